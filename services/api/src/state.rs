//! Application state shared across handlers

use common::revocation::RevocationList;
use common::session::SessionCodec;
use std::sync::Arc;

use crate::config::ApiSettings;
use crate::mailer::Mailer;
use crate::repositories::{CourseStore, TeacherStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub courses: Arc<dyn CourseStore>,
    pub teachers: Arc<dyn TeacherStore>,
    pub codec: SessionCodec,
    pub revocations: Arc<dyn RevocationList>,
    /// `None` until an email provider key is configured
    pub mailer: Option<Arc<dyn Mailer>>,
    pub settings: Arc<ApiSettings>,
}
