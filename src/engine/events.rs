// ==========================================
// ESG 评估与项目地图 - 项目登记表变更事件
// ==========================================
// 职责: 定义登记表变更事件与订阅者 trait
// 说明: 登记表只负责发布,不感知地图标记（依赖单向: 登记表 → 地图）
// ==========================================

use crate::domain::project::{ProjectId, ProjectRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ==========================================
// 变更事件类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEventType {
    /// 追加单条记录
    Appended,
    /// 整体替换
    Replaced,
}

impl RegistryEventType {
    pub fn as_str(&self) -> &str {
        match self {
            RegistryEventType::Appended => "Appended",
            RegistryEventType::Replaced => "Replaced",
        }
    }
}

/// 登记表变更事件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryEvent {
    /// 变更后的修订号（每次变更 +1）
    pub revision: u64,
    pub event_type: RegistryEventType,
    /// 追加事件对应的记录
    pub appended_id: Option<ProjectId>,
    /// 变更后的记录数
    pub record_count: usize,
}

impl RegistryEvent {
    pub fn appended(revision: u64, id: ProjectId, record_count: usize) -> Self {
        Self {
            revision,
            event_type: RegistryEventType::Appended,
            appended_id: Some(id),
            record_count,
        }
    }

    pub fn replaced(revision: u64, record_count: usize) -> Self {
        Self {
            revision,
            event_type: RegistryEventType::Replaced,
            appended_id: None,
            record_count,
        }
    }
}

// ==========================================
// 订阅者 Trait
// ==========================================

/// 登记表订阅者
///
/// 每次变更后收到事件与变更后的完整快照
/// 实现者: MapSyncController、测试用记录器
pub trait RegistrySubscriber: Send + Sync {
    fn on_registry_changed(&self, event: &RegistryEvent, snapshot: &Arc<Vec<ProjectRecord>>);
}
