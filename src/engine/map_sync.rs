// ==========================================
// ESG 评估与项目地图 - 地图标记同步控制器
// ==========================================
// 职责: 保持地图标记集合与项目登记表一致
// 策略: full_rebuild（全部拆除后重建）/ diff（按记录标识增量）
// 红线: 单次变更的重建在锁内完成,外部观察不到半成品标记集合
// 说明: 地图底图（平移/缩放/瓦片）由外部负责,这里只管标记生命周期与内容
// ==========================================

use crate::config::{MapViewport, SyncStrategy};
use crate::domain::project::{format_percent, GeoPoint, ProjectId, ProjectRecord};
use crate::domain::types::{ProjectCategory, ScoreTier};
use crate::engine::events::{RegistryEvent, RegistrySubscriber};
use serde::Serialize;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

// ==========================================
// 标记内容
// ==========================================

/// 按项目类型区分的图标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerIcon {
    pub category: ProjectCategory,
    pub glyph: &'static str,
    pub color_class: &'static str,
}

impl MarkerIcon {
    pub fn for_category(category: ProjectCategory) -> Self {
        let (glyph, color_class) = match category {
            ProjectCategory::Solar => ("sun", "text-amber-500"),
            ProjectCategory::Wind => ("wind", "text-blue-500"),
            ProjectCategory::Hydro => ("waves", "text-cyan-500"),
            ProjectCategory::Biomass => ("flame", "text-green-500"),
            ProjectCategory::Geothermal => ("mountain", "text-red-500"),
        };
        Self {
            category,
            glyph,
            color_class,
        }
    }
}

/// 弹窗内容（只读派生自记录）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupContent {
    pub title: String,
    pub subtitle: String,
    pub score: f64,
    pub score_label: String,
    pub tier: ScoreTier,
    /// 评分条宽度（0~100,NaN 记为 0）
    pub bar_width: f64,
}

impl PopupContent {
    pub fn from_record(record: &ProjectRecord) -> Self {
        let score = record.composite_score();
        let bar_width = if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) };
        Self {
            title: record.name().to_string(),
            subtitle: record.location().to_string(),
            score,
            score_label: format_percent(score),
            tier: ScoreTier::from_score(score),
            bar_width,
        }
    }

    /// 渲染弹窗 HTML（自由文本做转义）
    pub fn to_html(&self, score_caption: &str) -> String {
        format!(
            concat!(
                "<div class=\"p-4\">",
                "<h3 class=\"font-semibold text-gray-900\">{title}</h3>",
                "<p class=\"text-sm text-gray-600 mt-1\">{subtitle}</p>",
                "<div class=\"mt-3\"><div class=\"flex items-center justify-between mb-1\">",
                "<span class=\"text-sm font-medium text-gray-700\">{caption}</span>",
                "<span class=\"text-sm font-medium text-gray-900\">{label}</span></div>",
                "<div class=\"w-full bg-gray-200 rounded-full h-2\">",
                "<div class=\"{tier_class} h-2 rounded-full\" style=\"width: {width}%\"></div>",
                "</div></div></div>"
            ),
            title = escape_html(&self.title),
            subtitle = escape_html(&self.subtitle),
            caption = escape_html(score_caption),
            label = self.score_label,
            tier_class = self.tier.color_class(),
            width = self.bar_width,
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 创建标记所需的全部信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub project_id: ProjectId,
    pub position: GeoPoint,
    pub icon: MarkerIcon,
    pub popup: PopupContent,
}

impl MarkerSpec {
    pub fn from_record(record: &ProjectRecord) -> Self {
        Self {
            project_id: record.id(),
            position: record.position(),
            icon: MarkerIcon::for_category(record.category()),
            popup: PopupContent::from_record(record),
        }
    }
}

/// 地图侧标记句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarkerHandle(pub u64);

/// 已创建的标记（与记录标识一一绑定）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub handle: MarkerHandle,
    pub spec: MarkerSpec,
}

impl Marker {
    pub fn project_id(&self) -> ProjectId {
        self.spec.project_id
    }
}

// ==========================================
// 地图表面 Trait
// ==========================================

/// 外部地图表面
///
/// 只需提供"在坐标处创建带图标+弹窗的标记"与"移除标记"两个原语
pub trait MapSurface: Send {
    fn create_marker(&mut self, spec: &MarkerSpec) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
}

/// 内存地图表面（测试与命令行导出使用）
#[derive(Debug, Clone, Default)]
pub struct InMemoryMapSurface {
    viewport: MapViewport,
    next_handle: u64,
    live: BTreeMap<MarkerHandle, MarkerSpec>,
    created_total: usize,
    removed_total: usize,
}

impl InMemoryMapSurface {
    pub fn new(viewport: MapViewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn viewport(&self) -> MapViewport {
        self.viewport
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn created_total(&self) -> usize {
        self.created_total
    }

    pub fn removed_total(&self) -> usize {
        self.removed_total
    }

    /// 导出为 GeoJSON FeatureCollection（坐标顺序: 经度, 纬度）
    ///
    /// 视口写入 foreign member `viewport`
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self.live.values().map(marker_feature).collect();

        let mut foreign_members = JsonObject::new();
        foreign_members.insert(
            "viewport".to_string(),
            json!({
                "center": [self.viewport.center_longitude, self.viewport.center_latitude],
                "zoom": self.viewport.zoom,
            }),
        );

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        }
    }
}

/// 单个标记 → GeoJSON Point Feature
fn marker_feature(spec: &MarkerSpec) -> Feature {
    let geometry = Geometry::new(Value::Point(vec![
        spec.position.longitude,
        spec.position.latitude,
    ]));

    let properties = match json!({
        "name": spec.popup.title,
        "location": spec.popup.subtitle,
        "category": spec.icon.category,
        "icon": spec.icon.glyph,
        "esg_score": spec.popup.score,
        "esg_score_label": spec.popup.score_label,
        "tier": spec.popup.tier,
    }) {
        JsonValue::Object(map) => Some(map),
        _ => None,
    };

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: Some(Id::String(spec.project_id.to_string())),
        properties,
        foreign_members: None,
    }
}

impl MapSurface for InMemoryMapSurface {
    fn create_marker(&mut self, spec: &MarkerSpec) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.live.insert(handle, spec.clone());
        self.created_total += 1;
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        if self.live.remove(&handle).is_some() {
            self.removed_total += 1;
        }
    }
}

// ==========================================
// MapSyncController
// ==========================================

/// 单次同步统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub created: usize,
    pub removed: usize,
    pub kept: usize,
}

struct SyncState<S> {
    surface: S,
    // 与登记表顺序一致
    markers: Vec<Marker>,
    applied_revision: Option<u64>,
}

pub struct MapSyncController<S: MapSurface> {
    strategy: SyncStrategy,
    state: Mutex<SyncState<S>>,
}

impl<S: MapSurface> MapSyncController<S> {
    pub fn new(surface: S, strategy: SyncStrategy) -> Self {
        Self {
            strategy,
            state: Mutex::new(SyncState {
                surface,
                markers: Vec::new(),
                applied_revision: None,
            }),
        }
    }

    pub fn strategy(&self) -> SyncStrategy {
        self.strategy
    }

    /// 按给定修订号的快照同步标记
    ///
    /// 修订号早于已应用修订号的快照被忽略（后写者胜）
    pub fn reconcile(&self, revision: u64, records: &[ProjectRecord]) -> SyncStats {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(applied) = state.applied_revision {
            if revision < applied {
                debug!(revision, applied, "忽略过期的登记表快照");
                return SyncStats::default();
            }
        }

        let stats = match self.strategy {
            SyncStrategy::FullRebuild => full_rebuild(&mut state, records),
            SyncStrategy::Diff => diff_sync(&mut state, records),
        };
        state.applied_revision = Some(revision);

        debug!(
            revision,
            strategy = %self.strategy,
            created = stats.created,
            removed = stats.removed,
            kept = stats.kept,
            "地图标记同步完成"
        );
        stats
    }

    pub fn marker_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .markers
            .len()
    }

    /// 当前标记（登记表顺序）
    pub fn markers(&self) -> Vec<Marker> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .markers
            .clone()
    }

    pub fn marker_for(&self, id: ProjectId) -> Option<Marker> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .markers
            .iter()
            .find(|m| m.project_id() == id)
            .cloned()
    }

    pub fn applied_revision(&self) -> Option<u64> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .applied_revision
    }

    /// 在锁内访问地图表面
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state.surface)
    }
}

fn full_rebuild<S: MapSurface>(state: &mut SyncState<S>, records: &[ProjectRecord]) -> SyncStats {
    let removed = state.markers.len();
    for marker in state.markers.drain(..) {
        state.surface.remove_marker(marker.handle);
    }

    let mut markers = Vec::with_capacity(records.len());
    for record in records {
        let spec = MarkerSpec::from_record(record);
        let handle = state.surface.create_marker(&spec);
        markers.push(Marker { handle, spec });
    }
    state.markers = markers;

    SyncStats {
        created: records.len(),
        removed,
        kept: 0,
    }
}

fn diff_sync<S: MapSurface>(state: &mut SyncState<S>, records: &[ProjectRecord]) -> SyncStats {
    // 同一标识可能出现多次（登记表不去重）,按出现顺序逐个复用
    let mut previous: HashMap<ProjectId, Vec<Marker>> = HashMap::new();
    for marker in state.markers.drain(..).rev() {
        previous.entry(marker.project_id()).or_default().push(marker);
    }

    let mut stats = SyncStats::default();
    let mut markers = Vec::with_capacity(records.len());
    for record in records {
        match previous.get_mut(&record.id()).and_then(|v| v.pop()) {
            Some(marker) => {
                stats.kept += 1;
                markers.push(marker);
            }
            None => {
                let spec = MarkerSpec::from_record(record);
                let handle = state.surface.create_marker(&spec);
                stats.created += 1;
                markers.push(Marker { handle, spec });
            }
        }
    }

    for marker in previous.into_values().flatten() {
        state.surface.remove_marker(marker.handle);
        stats.removed += 1;
    }

    state.markers = markers;
    stats
}

impl<S: MapSurface> RegistrySubscriber for MapSyncController<S> {
    fn on_registry_changed(&self, event: &RegistryEvent, snapshot: &Arc<Vec<ProjectRecord>>) {
        self.reconcile(event.revision, snapshot);
    }
}
