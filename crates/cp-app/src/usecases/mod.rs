pub mod auth;
pub mod navigation;
pub mod onboarding;
pub mod session;

pub use auth::{AuthFlow, AuthFlowError};
pub use navigation::{Navigation, NavigationError, Navigator};
pub use onboarding::{OnboardingError, OnboardingWizard, ProgressError, ProgressTracker, WizardView};
pub use session::{SessionContext, SessionError, SessionManager};
