use crate::domain::model::QuoteView;
use crate::domain::ports::FormSurface;
use crate::utils::error::{QuoteError, Result};
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;

fn lock_poisoned() -> QuoteError {
    QuoteError::IoError(std::io::Error::other("surface writer lock poisoned"))
}

/// Human-readable form rendering.
pub struct TerminalSurface<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

pub fn render_text(view: &QuoteView) -> String {
    let mut lines = vec![format!("Mínimo de horas: {}", view.min_hours_label)];

    if !view.hours_enabled {
        lines.push(view.hours_placeholder.clone());
    }

    if view.show_details {
        if let Some(hours) = view.effective_hours {
            lines.push(format!("Horas: {}", hours));
        }
        if let Some(photos) = view.photo_count {
            lines.push(format!("Fotos: {}", photos));
        }
        if let Some(rate) = &view.hourly_rate {
            lines.push(format!("Valor por hora: {}", rate));
        }
        if let Some(subtotal) = &view.subtotal {
            lines.push(format!("Subtotal: {}", subtotal));
        }
    }

    if view.show_result {
        if let Some(price) = &view.final_price {
            lines.push(format!("Valor final: {}", price));
        }
        if let Some(annotation) = &view.annotation {
            lines.push(format!("Pagamento: {}", annotation));
        }
    }

    lines.join("\n")
}

#[async_trait]
impl<W: Write + Send> FormSurface for TerminalSurface<W> {
    async fn render(&self, view: &QuoteView) -> Result<()> {
        let mut out = self.out.lock().map_err(|_| lock_poisoned())?;
        writeln!(out, "{}\n", render_text(view))?;
        out.flush()?;
        Ok(())
    }
}

/// One JSON object per view, for piping into other tools.
pub struct JsonLinesSurface<W: Write + Send> {
    out: Mutex<W>,
}

impl JsonLinesSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> JsonLinesSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl<W: Write + Send> FormSurface for JsonLinesSurface<W> {
    async fn render(&self, view: &QuoteView) -> Result<()> {
        let line = serde_json::to_string(view)?;
        let mut out = self.out.lock().map_err(|_| lock_poisoned())?;
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::PricingEngine;

    #[test]
    fn test_render_text_without_service() {
        let engine = PricingEngine::default();
        let text = render_text(&engine.render(&engine.initial_state()));
        assert_eq!(text, "Mínimo de horas: -\nSelecione o tipo de sessão primeiro");
    }

    #[test]
    fn test_render_text_with_result() {
        let engine = PricingEngine::default();
        let state = engine.select_service(&engine.initial_state(), Some("ensaio-casal"));
        let text = render_text(&engine.render(&state));

        assert!(text.contains("Horas: 2"));
        assert!(text.contains("Fotos: 40"));
        assert!(text.contains("Subtotal: R$\u{a0}500,00"));
        assert!(text.contains("Valor final: 450,00"));
        assert!(text.contains("Pagamento: 10% de desconto sobre R$\u{a0}500,00"));
    }

    #[test]
    fn test_json_lines_surface() {
        let engine = PricingEngine::default();
        let state = engine.select_service(&engine.initial_state(), Some("eventos-gerais"));
        let surface = JsonLinesSurface::new(Vec::new());

        tokio_test::block_on(surface.render(&engine.render(&state))).unwrap();

        let output = String::from_utf8(surface.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["effective_hours"], 3);
        assert_eq!(value["final_price"], "405,00");
        assert_eq!(value["show_result"], true);
    }
}
