// ==========================================
// ESG 评估与项目地图 - 坐标解析
// ==========================================
// 职责: 评估路径与导入路径共用的坐标解析/校验
// 规则: 普通十进制写法 + 有限值; 地理范围不作为拒收条件
// ==========================================

use crate::domain::import::{parse_plain_decimal, CellValue};
use crate::domain::project::GeoPoint;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("坐标无法解析为数字 ({field}): {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("坐标不是有限值 ({field}): {value}")]
    NonFinite { field: &'static str, value: f64 },
}

pub const LATITUDE_FIELD: &str = "latitude";
pub const LONGITUDE_FIELD: &str = "longitude";

/// 解析单个坐标文本
pub fn parse_coordinate(field: &'static str, text: &str) -> Result<f64, CoordinateError> {
    let value = parse_plain_decimal(text).ok_or_else(|| CoordinateError::NotNumeric {
        field,
        value: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(CoordinateError::NonFinite { field, value });
    }
    Ok(value)
}

/// 解析经纬度文本对
pub fn parse_coordinates(latitude: &str, longitude: &str) -> Result<GeoPoint, CoordinateError> {
    let lat = parse_coordinate(LATITUDE_FIELD, latitude)?;
    let lon = parse_coordinate(LONGITUDE_FIELD, longitude)?;
    Ok(GeoPoint::new(lat, lon))
}

/// 导入路径: 从弱类型单元格解析（与文本路径走同一校验）
pub fn coordinates_from_cells(
    latitude: &CellValue,
    longitude: &CellValue,
) -> Result<GeoPoint, CoordinateError> {
    parse_coordinates(&latitude.to_text(), &longitude.to_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_pair() {
        let point = parse_coordinates(" 39.8283", "-98.5795 ").unwrap();
        assert_eq!(point, GeoPoint::new(39.8283, -98.5795));
    }

    #[test]
    fn test_reject_text() {
        let err = parse_coordinates("not-a-number", "10").unwrap_err();
        assert_eq!(
            err,
            CoordinateError::NotNumeric {
                field: LATITUDE_FIELD,
                value: "not-a-number".to_string()
            }
        );
    }

    #[test]
    fn test_reject_empty_longitude() {
        let err = parse_coordinates("10", "").unwrap_err();
        assert!(matches!(err, CoordinateError::NotNumeric { field: LONGITUDE_FIELD, .. }));
    }

    #[test]
    fn test_reject_overflow_to_infinity() {
        let err = parse_coordinate(LATITUDE_FIELD, "1e999").unwrap_err();
        assert!(matches!(err, CoordinateError::NonFinite { .. }));
    }

    #[test]
    fn test_cells_use_same_rules_as_text() {
        let ok = coordinates_from_cells(&CellValue::Number(45.5), &CellValue::Number(-122.25));
        assert_eq!(ok, Ok(GeoPoint::new(45.5, -122.25)));

        let empty = coordinates_from_cells(&CellValue::Empty, &CellValue::Number(1.0));
        assert!(empty.is_err());

        let text = coordinates_from_cells(&CellValue::Number(1.0), &CellValue::Text("n/a".into()));
        assert!(text.is_err());
    }

    #[test]
    fn test_out_of_range_is_not_rejected() {
        // 范围检查仅作为 DQ 警告,不阻断
        assert!(parse_coordinates("120", "200").is_ok());
    }
}
