// ==========================================
// ESG 评估与项目地图 - 项目类型推断
// ==========================================
// 职责: 根据项目名称推断项目类型
// 规则: 名称转小写后按优先级做子串匹配,首个命中即返回
//       solar → wind → hydro → biomass(3 种拼写) → geothermal
//       均未命中 → solar
// 说明: 启发式推断,非权威分类
// ==========================================

use crate::domain::types::ProjectCategory;

/// 未命中任何关键词时的默认类型
pub const FALLBACK_CATEGORY: ProjectCategory = ProjectCategory::Solar;

/// 关键词表（顺序即优先级）
const KEYWORD_TABLE: &[(ProjectCategory, &[&str])] = &[
    (ProjectCategory::Solar, &["solar"]),
    (ProjectCategory::Wind, &["wind"]),
    (ProjectCategory::Hydro, &["hydro"]),
    (ProjectCategory::Biomass, &["biomass", "biogass", "bioenergy"]),
    (ProjectCategory::Geothermal, &["geothermal"]),
];

/// 推断项目类型
pub fn infer_category(name: &str) -> ProjectCategory {
    match_keyword(name).unwrap_or(FALLBACK_CATEGORY)
}

/// 返回命中的类型; 未命中返回 None（调用方可据此区分"推断"与"默认"）
pub fn match_keyword(name: &str) -> Option<ProjectCategory> {
    let folded = name.to_lowercase();
    KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| folded.contains(kw)))
        .map(|(category, _)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_each_category() {
        assert_eq!(infer_category("Desert Sun Solar Park"), ProjectCategory::Solar);
        assert_eq!(infer_category("Big Wind Farm"), ProjectCategory::Wind);
        assert_eq!(infer_category("Hydroelectric Dam 4"), ProjectCategory::Hydro);
        assert_eq!(infer_category("Acme Biogass Plant"), ProjectCategory::Biomass);
        assert_eq!(infer_category("County Bioenergy Center"), ProjectCategory::Biomass);
        assert_eq!(infer_category("Biomass Co-Gen"), ProjectCategory::Biomass);
        assert_eq!(infer_category("Geothermal Station"), ProjectCategory::Geothermal);
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(infer_category("Solar + Wind Hybrid"), ProjectCategory::Solar);
        assert_eq!(infer_category("WIND and solar"), ProjectCategory::Solar);
        assert_eq!(infer_category("Wind-Hydro Storage"), ProjectCategory::Wind);
    }

    #[test]
    fn test_fallback_is_solar() {
        assert_eq!(infer_category("Project 42"), ProjectCategory::Solar);
        assert_eq!(infer_category(""), ProjectCategory::Solar);
        assert_eq!(match_keyword("Project 42"), None);
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(infer_category("GEOTHERMAL"), ProjectCategory::Geothermal);
    }
}
