use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading the source table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("'{}' 파일을 찾을 수 없습니다. 실행 디렉토리에 파일이 있는지 확인해주세요.", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("필수 컬럼 '{column}'이(가) 없습니다")]
    MissingColumn { column: &'static str },

    #[error("{row}행 '{column}' 값 '{value}'을(를) 해석할 수 없습니다")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Recoverable outcomes that stop the pipeline before anything is charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("표시할 데이터를 보려면 년도와 지역을 하나 이상 선택해주세요.")]
    EmptySelection,

    #[error("선택하신 조건에 해당하는 데이터가 없습니다.")]
    EmptyResult,
}
