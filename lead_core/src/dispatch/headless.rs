//! In-memory surface that records every effect the dispatcher requests

use super::surface::{DispatchUi, FormSurface, LinkOpener, Presentation, SubmitControl, Toast, Toaster};
use crate::error::{AppError, Result};
use crate::models::DispatchResult;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Default)]
struct SurfaceState {
    label: String,
    disabled: bool,
    label_history: Vec<String>,
    toasts: Vec<Toast>,
    opened: Vec<String>,
    resets: usize,
    refreshes: usize,
    open_failure: Option<String>,
}

#[derive(Clone, Default)]
pub struct HeadlessSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl HeadlessSurface {
    pub fn new(label: impl Into<String>) -> Self {
        let surface = Self::default();
        surface.state.lock().label = label.into();
        surface
    }

    /// Makes every subsequent `open` fail with `reason`.
    pub fn failing_open(self, reason: impl Into<String>) -> Self {
        self.state.lock().open_failure = Some(reason.into());
        self
    }

    pub fn ui(&self) -> DispatchUi {
        DispatchUi {
            control: Arc::new(self.clone()),
            toaster: Arc::new(self.clone()),
            form: Arc::new(self.clone()),
            opener: Arc::new(self.clone()),
            presentation: Arc::new(self.clone()),
        }
    }

    pub fn label_history(&self) -> Vec<String> {
        self.state.lock().label_history.clone()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.state.lock().toasts.clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.state.lock().opened.clone()
    }

    pub fn resets(&self) -> usize {
        self.state.lock().resets
    }

    pub fn refreshes(&self) -> usize {
        self.state.lock().refreshes
    }

    pub fn report(&self, result: DispatchResult) -> DispatchReport {
        let state = self.state.lock();
        DispatchReport {
            result,
            deep_link: state.opened.last().cloned(),
            toasts: state.toasts.clone(),
            form_reset: state.resets > 0,
        }
    }
}

impl SubmitControl for HeadlessSurface {
    fn label(&self) -> String {
        self.state.lock().label.clone()
    }

    fn set_label(&self, label: &str) {
        let mut state = self.state.lock();
        state.label = label.to_string();
        state.label_history.push(label.to_string());
    }

    fn is_disabled(&self) -> bool {
        self.state.lock().disabled
    }

    fn set_disabled(&self, disabled: bool) {
        self.state.lock().disabled = disabled;
    }
}

impl Toaster for HeadlessSurface {
    fn show(&self, toast: &Toast) {
        self.state.lock().toasts.push(toast.clone());
    }
}

impl FormSurface for HeadlessSurface {
    fn reset(&self) {
        self.state.lock().resets += 1;
    }
}

#[async_trait]
impl LinkOpener for HeadlessSurface {
    async fn open(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(reason) = &state.open_failure {
            return Err(AppError::Delivery(reason.clone()));
        }
        state.opened.push(url.to_string());
        Ok(())
    }
}

impl Presentation for HeadlessSurface {
    fn refresh(&self) {
        self.state.lock().refreshes += 1;
    }
}

/// Everything a caller needs to finish the hand-off itself: the outcome,
/// the link to open and the toasts to show.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    #[serde(flatten)]
    pub result: DispatchResult,
    pub deep_link: Option<String>,
    pub toasts: Vec<Toast>,
    pub form_reset: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ToastKind;

    #[tokio::test]
    async fn test_records_effects() {
        let surface = HeadlessSurface::new("Enviar");
        let ui = surface.ui();

        ui.control.set_label("Enviando...");
        ui.control.set_disabled(true);
        ui.opener.open("https://wa.me/5511973933390?text=oi").await.unwrap();
        ui.form.reset();
        ui.toaster.show(&Toast::success("ok"));

        assert_eq!(surface.label(), "Enviando...");
        assert!(surface.is_disabled());

        let report = surface.report(DispatchResult::Success { message: "ok".to_string() });
        assert_eq!(report.deep_link.as_deref(), Some("https://wa.me/5511973933390?text=oi"));
        assert!(report.form_reset);
        assert_eq!(report.toasts[0].kind, ToastKind::Success);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["result"], "success");
        assert_eq!(value["message"], "ok");
    }

    #[tokio::test]
    async fn test_failing_open() {
        let surface = HeadlessSurface::new("Enviar").failing_open("popup bloqueado");
        let err = surface.ui().opener.open("https://wa.me/1").await.unwrap_err();
        assert!(err.to_string().contains("popup bloqueado"));
        assert!(surface.opened().is_empty());
    }
}
