use crate::domain::input_source::path_error::PathError;
use crate::domain::template_png::SaveError;
use crate::domain::template_recolor::RecolorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/Oエラーが発生しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("パス関連のエラー: {0}")]
    Path(#[from] PathError),

    #[error("テンプレート変換エラー: {0}")]
    Recolor(#[from] RecolorError),

    #[error("保存エラー: {0}")]
    Save(#[from] SaveError),

    #[error("スレッドプールの作成に失敗しました: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
