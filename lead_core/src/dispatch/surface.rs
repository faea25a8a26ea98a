//! Collaborators the dispatcher drives. Each one is a seam a page, a test or the
//! headless HTTP surface can implement.

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub const TOAST_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            duration: TOAST_DURATION,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            duration: TOAST_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Class list applied to the toast element while it is shown.
    pub fn class_name(&self) -> String {
        format!("toast {} show", self.kind.as_str())
    }
}

pub trait SubmitControl: Send + Sync {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
}

/// Shows a toast; dismissing it after `toast.duration` is the implementor's job.
pub trait Toaster: Send + Sync {
    fn show(&self, toast: &Toast);
}

pub trait FormSurface: Send + Sync {
    fn reset(&self);
}

/// Opens a URL in a new top-level browsing context.
///
/// A blocked popup is indistinguishable from success for most hosts, so
/// implementations only fail when opening itself raises.
#[async_trait]
pub trait LinkOpener: Send + Sync {
    async fn open(&self, url: &str) -> Result<()>;
}

/// Re-renders presentation (icons and similar) after a DOM mutation.
pub trait Presentation: Send + Sync {
    fn refresh(&self);
}

#[derive(Clone)]
pub struct DispatchUi {
    pub control: Arc<dyn SubmitControl>,
    pub toaster: Arc<dyn Toaster>,
    pub form: Arc<dyn FormSurface>,
    pub opener: Arc<dyn LinkOpener>,
    pub presentation: Arc<dyn Presentation>,
}
