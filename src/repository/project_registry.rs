// ==========================================
// ESG 评估与项目地图 - 项目登记表
// ==========================================
// 职责: 会话内唯一的项目记录集合（有序）
// 变更方式: append（评估提交）/ replace_all（批量导入）
// 红线: 不去重、不合并; 不感知地图标记
// ==========================================

use crate::domain::project::{ProjectId, ProjectRecord};
use crate::engine::events::{RegistryEvent, RegistrySubscriber};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

#[derive(Default)]
struct RegistryState {
    records: Arc<Vec<ProjectRecord>>,
    revision: u64,
}

// ==========================================
// ProjectRegistry
// ==========================================
#[derive(Default)]
pub struct ProjectRegistry {
    state: RwLock<RegistryState>,
    subscribers: RwLock<Vec<Arc<dyn RegistrySubscriber>>>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册订阅者; 注册后立即以当前快照同步一次
    ///
    /// 先登记再读快照: 之后的任何变更都会送达,订阅者需忽略过期修订号
    pub fn subscribe(&self, subscriber: Arc<dyn RegistrySubscriber>) {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(subscriber.clone());

        let (revision, snapshot) = {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            (state.revision, state.records.clone())
        };
        subscriber.on_registry_changed(&RegistryEvent::replaced(revision, snapshot.len()), &snapshot);
    }

    /// 追加单条记录（保持已有记录顺序）
    pub fn append(&self, record: ProjectRecord) -> RegistryEvent {
        let id = record.id();
        let (event, snapshot) = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            Arc::make_mut(&mut state.records).push(record);
            state.revision += 1;
            (
                RegistryEvent::appended(state.revision, id, state.records.len()),
                state.records.clone(),
            )
        };

        debug!(project_id = %id, revision = event.revision, total = event.record_count, "登记表追加记录");
        self.notify(&event, &snapshot);
        event
    }

    /// 整体替换（丢弃原有全部记录）
    pub fn replace_all(&self, records: Vec<ProjectRecord>) -> RegistryEvent {
        let (event, snapshot) = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.records = Arc::new(records);
            state.revision += 1;
            (
                RegistryEvent::replaced(state.revision, state.records.len()),
                state.records.clone(),
            )
        };

        info!(revision = event.revision, total = event.record_count, "登记表整体替换");
        self.notify(&event, &snapshot);
        event
    }

    /// 当前记录序列（只读快照）
    pub fn snapshot(&self) -> Arc<Vec<ProjectRecord>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .clone()
    }

    pub fn get(&self, id: ProjectId) -> Option<ProjectRecord> {
        self.snapshot().iter().find(|r| r.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn revision(&self) -> u64 {
        self.state.read().unwrap_or_else(PoisonError::into_inner).revision
    }

    fn notify(&self, event: &RegistryEvent, snapshot: &Arc<Vec<ProjectRecord>>) {
        let subscribers = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for subscriber in subscribers {
            subscriber.on_registry_changed(event, snapshot);
        }
    }
}
