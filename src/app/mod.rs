// ==========================================
// ESG 评估与项目地图 - 应用层
// ==========================================
// 职责: 组装会话状态,连接命令行与引擎/导入层
// ==========================================

pub mod error;
pub mod state;

// 重导出
pub use error::{AppError, AppResult};
pub use state::AppState;
