use crate::core::engine::PricingEngine;
use crate::domain::model::{QuoteState, QuoteView};
use crate::domain::ports::FormSurface;
use crate::utils::error::{QuoteError, Result};
use tokio::sync::mpsc;

/// A change raised by the booking form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Empty string means the selection was cleared.
    ServiceChanged(String),
    HoursInput(String),
    PaymentChanged(String),
}

impl FormEvent {
    /// Parses one line of the stdin protocol:
    ///
    /// ```text
    /// service ensaio-casal
    /// hours 4
    /// payment credito-3x
    /// service
    /// ```
    ///
    /// Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command.to_ascii_lowercase().as_str() {
            "service" => Ok(Some(FormEvent::ServiceChanged(argument.to_string()))),
            "hours" => Ok(Some(FormEvent::HoursInput(argument.to_string()))),
            "payment" if !argument.is_empty() => {
                Ok(Some(FormEvent::PaymentChanged(argument.to_string())))
            }
            "payment" => Err(QuoteError::InvalidEvent {
                line: line.to_string(),
                reason: "payment requires an identifier".to_string(),
            }),
            other => Err(QuoteError::InvalidEvent {
                line: line.to_string(),
                reason: format!("unknown command '{}'", other),
            }),
        }
    }
}

/// Owns the engine and the current state for one form.
#[derive(Debug, Clone)]
pub struct FormSession {
    engine: PricingEngine,
    state: QuoteState,
}

impl FormSession {
    pub fn new(engine: PricingEngine) -> Self {
        let state = engine.initial_state();
        Self { engine, state }
    }

    pub fn state(&self) -> &QuoteState {
        &self.state
    }

    pub fn view(&self) -> QuoteView {
        self.engine.render(&self.state)
    }

    /// One full recomputation per event.
    pub fn apply(&mut self, event: FormEvent) -> QuoteView {
        tracing::debug!(?event, "Form event");
        self.state = match &event {
            FormEvent::ServiceChanged(id) => self.engine.select_service(&self.state, Some(id)),
            FormEvent::HoursInput(raw) => self.engine.set_hours_text(&self.state, raw),
            FormEvent::PaymentChanged(id) => self.engine.set_payment_method(&self.state, id),
        };
        self.view()
    }
}

/// The single subscription: renders the initial view, then one view per
/// event until every sender is dropped. Returns the number of events handled.
pub async fn run_session<S: FormSurface>(
    mut session: FormSession,
    mut events: mpsc::Receiver<FormEvent>,
    surface: &S,
) -> Result<usize> {
    surface.render(&session.view()).await?;

    let mut handled = 0;
    while let Some(event) = events.recv().await {
        let view = session.apply(event);
        surface.render(&view).await?;
        handled += 1;
    }

    tracing::info!(events = handled, "Form session finished");
    Ok(handled)
}
