use photo_quote::{
    run_session, FormEvent, FormSession, JsonLinesSurface, PricingEngine, TerminalSurface,
};
use tokio::sync::mpsc;

fn events(lines: &str) -> Vec<FormEvent> {
    lines
        .lines()
        .filter_map(|line| FormEvent::parse_line(line).ok().flatten())
        .collect()
}

#[tokio::test]
async fn test_session_replays_form_events_as_json_lines() {
    let script = r#"
# casal, two hours, PIX
service ensaio-casal
hours 2
payment pix

# corporate event with a 3x card
service evento-corporativo
hours 5
payment credito-3x

# below the minimum
service eventos-gerais
hours 1

# cleared
service
"#;

    let (tx, rx) = mpsc::channel(4);
    let producer = tokio::spawn(async move {
        for event in events(script) {
            tx.send(event).await.unwrap();
        }
    });

    let surface = JsonLinesSurface::new(Vec::new());
    let session = FormSession::new(PricingEngine::default());
    let handled = run_session(session, rx, &surface).await.unwrap();
    producer.await.unwrap();

    assert_eq!(handled, 9);

    let output = String::from_utf8(surface.into_inner()).unwrap();
    let views: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(views.len(), 10);

    // initial view
    assert_eq!(views[0]["show_result"], false);
    assert_eq!(views[0]["min_hours_label"], "-");

    // after `payment pix`
    assert_eq!(views[3]["subtotal"], "R$\u{a0}500,00");
    assert_eq!(views[3]["final_price"], "450,00");

    // after `payment credito-3x`
    assert_eq!(views[6]["subtotal"], "R$\u{a0}650,00");
    assert_eq!(views[6]["final_price"], "682,50");
    assert_eq!(views[6]["annotation"], "5% de acréscimo sobre R$\u{a0}650,00");

    // after `hours 1` on eventos-gerais, still paying with credito-3x
    assert_eq!(views[8]["effective_hours"], 3);
    assert_eq!(views[8]["subtotal"], "R$\u{a0}450,00");

    // after clearing the service
    assert_eq!(views[9]["show_result"], false);
    assert_eq!(views[9]["show_details"], false);
    assert!(views[9]["final_price"].is_null());
}

#[tokio::test]
async fn test_events_before_service_selection_are_ignored() {
    let (tx, rx) = mpsc::channel(8);
    tx.send(FormEvent::HoursInput("10".to_string())).await.unwrap();
    tx.send(FormEvent::PaymentChanged("credito-1x".to_string()))
        .await
        .unwrap();
    tx.send(FormEvent::ServiceChanged("ensaio-familia".to_string()))
        .await
        .unwrap();
    drop(tx);

    let surface = TerminalSurface::new(Vec::new());
    let session = FormSession::new(PricingEngine::default());
    run_session(session, rx, &surface).await.unwrap();

    let output = String::from_utf8(surface.into_inner()).unwrap();
    let last_view = output.trim_end().rsplit("\n\n").next().unwrap();

    assert!(last_view.contains("Horas: 2"));
    assert!(last_view.contains("Subtotal: R$\u{a0}700,00"));
    assert!(last_view.contains("Valor final: 700,00"));
    assert!(last_view.contains("Pagamento: Sem alteração"));
}

#[tokio::test]
async fn test_unknown_ids_degrade_gracefully() {
    let mut session = FormSession::new(PricingEngine::default());

    let view = session.apply(FormEvent::ServiceChanged("casamento".to_string()));
    assert!(!view.show_result);

    session.apply(FormEvent::ServiceChanged("ensaio-casal".to_string()));
    let view = session.apply(FormEvent::PaymentChanged("boleto".to_string()));
    assert_eq!(session.state().payment, "pix");
    assert_eq!(view.final_price.as_deref(), Some("450,00"));

    let view = session.apply(FormEvent::HoursInput("muitas".to_string()));
    assert_eq!(view.effective_hours, Some(2));
}
