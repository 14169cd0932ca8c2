//! Nombres de los campos del formulario de inscripción.
pub const FULL_NAME: &str = "full_name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const ORGANIZATION: &str = "organization";
pub const JOB_TITLE: &str = "job_title";
pub const PAYMENT_METHOD: &str = "payment_method";
pub const RECEIPT: &str = "receipt";

/// Identificadores de los tres steps.
pub const STEP_PERSONAL_INFO: &str = "personal_info";
pub const STEP_PAYMENT_METHOD: &str = "payment_method";
pub const STEP_RECEIPT_UPLOAD: &str = "receipt_upload";
