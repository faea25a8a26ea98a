use super::surface::{DispatchUi, Toast, TOAST_DURATION};
use crate::error::Result;
use crate::models::{DispatchResult, SubmissionPayload};
use crate::site::SiteProfile;
use crate::validation::validate;
use std::time::Duration;
use tracing::{debug, error};

pub const BUSY_LABEL: &str = "Enviando...";
pub const IDLE_LABEL: &str = "Enviar Mensagem";

pub const VALIDATION_MESSAGE: &str = "Por favor, preencha todos os campos obrigatórios.";
pub const SUCCESS_MESSAGE: &str = "Mensagem enviada! Redirecionando para o WhatsApp.";
pub const FAILURE_MESSAGE: &str = "Erro ao enviar mensagem. Tente novamente.";

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Minimum time the control stays busy before the link is opened.
    pub busy_delay: Duration,
    pub toast_duration: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            busy_delay: Duration::from_millis(1500),
            toast_duration: TOAST_DURATION,
        }
    }
}

/// Sends a validated contact form to WhatsApp through a pre-filled deep link.
///
/// Nothing guards against overlapping calls: a second submit while the first
/// is still busy runs to completion on its own.
pub struct Dispatcher {
    profile: SiteProfile,
    ui: DispatchUi,
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(profile: SiteProfile, ui: DispatchUi) -> Self {
        Self {
            profile,
            ui,
            settings: DispatchSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: DispatchSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    pub async fn submit(&self, payload: &SubmissionPayload) -> DispatchResult {
        if !validate(payload, self.profile.required_fields()) {
            self.toast(Toast::error(VALIDATION_MESSAGE));
            return DispatchResult::ValidationFailure {
                message: VALIDATION_MESSAGE.to_string(),
            };
        }

        let original_label = self.ui.control.label();
        self.ui.control.set_label(BUSY_LABEL);
        self.ui.control.set_disabled(true);

        match self.deliver(payload).await {
            Ok(url) => {
                debug!(site = %self.profile.whatsapp_number, url_len = url.len(), "Deep link opened");
                self.ui.form.reset();
                self.toast(Toast::success(SUCCESS_MESSAGE));
                self.restore(&original_label);
                DispatchResult::Success {
                    message: SUCCESS_MESSAGE.to_string(),
                }
            }
            Err(e) => {
                error!("Erro ao enviar mensagem: {}", e);
                self.toast(Toast::error(FAILURE_MESSAGE));
                self.restore(IDLE_LABEL);
                DispatchResult::DeliveryFailure {
                    message: FAILURE_MESSAGE.to_string(),
                }
            }
        }
    }

    async fn deliver(&self, payload: &SubmissionPayload) -> Result<String> {
        tokio::time::sleep(self.settings.busy_delay).await;

        let message = self.profile.render_message(payload);
        let url = self.profile.deep_link_for(&message);
        self.ui.opener.open(&url).await?;

        Ok(url)
    }

    fn toast(&self, toast: Toast) {
        self.ui
            .toaster
            .show(&toast.with_duration(self.settings.toast_duration));
    }

    fn restore(&self, label: &str) {
        let label = if label.trim().is_empty() { IDLE_LABEL } else { label };
        self.ui.control.set_label(label);
        self.ui.control.set_disabled(false);
        self.ui.presentation.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{HeadlessSurface, SubmitControl};

    fn instant() -> DispatchSettings {
        DispatchSettings {
            busy_delay: Duration::ZERO,
            ..DispatchSettings::default()
        }
    }

    #[tokio::test]
    async fn test_validation_failure_skips_busy_state() {
        let surface = HeadlessSurface::new("Enviar Mensagem");
        let dispatcher = Dispatcher::new(SiteProfile::portfolio(), surface.ui()).with_settings(instant());

        let payload = SubmissionPayload::from_pairs([("nome", "Carlos")]);
        let result = dispatcher.submit(&payload).await;

        assert_eq!(result.message(), VALIDATION_MESSAGE);
        assert!(surface.label_history().is_empty());
        assert!(surface.opened().is_empty());
        assert_eq!(surface.resets(), 0);
    }

    #[tokio::test]
    async fn test_success_restores_original_label() {
        let surface = HeadlessSurface::new("Quero um orçamento");
        let dispatcher = Dispatcher::new(SiteProfile::portfolio(), surface.ui()).with_settings(instant());

        let payload = SubmissionPayload::from_pairs([
            ("nome", "Carlos"),
            ("email", "c@x.com"),
            ("telefone", "11999999999"),
            ("interesse", "Consultoria"),
        ]);
        let result = dispatcher.submit(&payload).await;

        assert!(result.is_success());
        assert_eq!(surface.label_history(), vec![BUSY_LABEL.to_string(), "Quero um orçamento".to_string()]);
        assert_eq!(surface.label(), "Quero um orçamento");
        assert!(!surface.is_disabled());
        assert_eq!(surface.refreshes(), 1);
    }

    #[tokio::test]
    async fn test_blank_original_label_falls_back() {
        let surface = HeadlessSurface::new("");
        let dispatcher = Dispatcher::new(SiteProfile::portfolio(), surface.ui()).with_settings(instant());

        let payload = SubmissionPayload::from_pairs([
            ("nome", "Carlos"),
            ("email", "c@x.com"),
            ("telefone", "11999999999"),
            ("interesse", "Consultoria"),
        ]);
        dispatcher.submit(&payload).await;

        assert_eq!(surface.label(), IDLE_LABEL);
    }
}
