// ==========================================
// 光伏安装分组引擎 - 字段派生
// ==========================================
// 职责: 由服务描述自由文本派生项目分类
// 红线: 恰好匹配一个关键字; 都不匹配或都匹配 → 加载失败
// ==========================================

use crate::domain::types::Classification;
use crate::importer::error::{ImportError, ImportResult};

/// 派生项目分类
///
/// # 规则
/// - 服务描述包含 "Residential"（区分大小写）→ Residential
/// - 服务描述包含 "Commercial"（区分大小写）→ Commercial
/// - 两者都包含 → AmbiguousClassification
/// - 两者都不包含 → UnknownClassification
pub fn classify_service(service: &str, row_number: usize) -> ImportResult<Classification> {
    let residential = service.contains(Classification::Residential.keyword());
    let commercial = service.contains(Classification::Commercial.keyword());

    match (residential, commercial) {
        (true, false) => Ok(Classification::Residential),
        (false, true) => Ok(Classification::Commercial),
        (true, true) => Err(ImportError::AmbiguousClassification {
            row: row_number,
            service: service.to_string(),
        }),
        (false, false) => Err(ImportError::UnknownClassification {
            row: row_number,
            service: service.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_service() {
        assert_eq!(
            classify_service("Residential Rooftop 5kW", 1).unwrap(),
            Classification::Residential
        );
        assert_eq!(
            classify_service("On-grid Commercial EPC", 2).unwrap(),
            Classification::Commercial
        );
    }

    #[test]
    fn test_classify_service_fails_fast() {
        assert!(matches!(
            classify_service("Residential + Commercial", 3),
            Err(ImportError::AmbiguousClassification { row: 3, .. })
        ));
        assert!(matches!(
            classify_service("Solar Pump", 4),
            Err(ImportError::UnknownClassification { row: 4, .. })
        ));
        // 区分大小写
        assert!(classify_service("residential", 5).is_err());
    }
}
