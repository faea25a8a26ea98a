//! Client-side submission dispatch: busy state, deep-link hand-off and toasts

pub mod dispatcher;
pub mod headless;
pub mod surface;

pub use dispatcher::{
    DispatchSettings, Dispatcher, BUSY_LABEL, FAILURE_MESSAGE, IDLE_LABEL, SUCCESS_MESSAGE,
    VALIDATION_MESSAGE,
};
pub use headless::{DispatchReport, HeadlessSurface};
pub use surface::{
    DispatchUi, FormSurface, LinkOpener, Presentation, SubmitControl, Toast, ToastKind, Toaster,
};
