//! 应用层

pub mod accounts;
pub mod assembler;
pub mod auth_gate;
pub mod jobs;
pub mod views;
pub mod workflow;

pub use accounts::{AccountService, LoginCommand, RegisterCommand};
pub use assembler::ViewAssembler;
pub use auth_gate::AuthGate;
pub use jobs::JobService;
pub use workflow::{ApplicationWorkflow, DeliveryOutcome, TransitionOutcome};

/// 上传的文件
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}
