//! 행 레코드 모듈
//!
//! CSV 한 행을 헤더 이름 기준의 JSON 객체로 변환하는 타입을 정의합니다.

use csv::StringRecord;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CConvertError, Result};

/// 변환된 데이터 한 건
///
/// 헤더 이름을 키로, 정리된 필드 문자열을 값으로 갖습니다.
/// JSON 객체로 그대로 직렬화됩니다 (키는 serde_json 맵 순서).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// 헤더와 데이터 행을 결합하여 레코드 생성
    ///
    /// # Arguments
    /// * `headers` - 정리된 헤더 이름 목록
    /// * `row` - CSV 파서가 읽은 데이터 행
    ///
    /// # Returns
    /// 필드 수가 헤더 수와 일치하면 `Record`, 아니면 `ShapeMismatch` 에러.
    /// 값은 양쪽 끝의 공백/개행/따옴표 문자가 제거됩니다.
    pub fn from_row(headers: &[String], row: &StringRecord) -> Result<Self> {
        if row.len() != headers.len() {
            return Err(CConvertError::ShapeMismatch {
                expected: headers.len(),
                actual: row.len(),
            });
        }

        let mut fields = Map::new();
        for (name, value) in headers.iter().zip(row.iter()) {
            let trimmed = value.trim_matches(|c: char| c.is_whitespace() || c == '"');
            fields.insert(name.clone(), Value::String(trimmed.to_string()));
        }

        Ok(Self { fields })
    }

    /// 필드 값 조회
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// 필드 수 반환
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 필드가 하나도 없는지 확인
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
