//! アプリケーションのメインワークフローを定義するモジュール。
//!
//! このモジュールは、UI層（`cli`）とドメイン層（`domain`）を仲介し、
//! PNG ファイル群をテンプレート画像へ変換する処理フローを実装します。
//! プロセス引数や環境変数には触れず、入力はすべて引数 (`Config` と入力パス) で受け取ります。

use crate::domain::color::{parse_hex_color, RgbColor};
use crate::domain::input_source::output_path::OutputMode;
use crate::domain::input_source::png_file_path::PngFilePath;
use crate::domain::raster_image::RasterImage;
use crate::domain::template_png::TemplatePng;
use crate::domain::template_recolor::recolor;
use crate::error::AppError;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// バッチ変換の設定。
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// 不透明ピクセルを塗りつぶす色。
    pub fill_color: RgbColor,
    /// 上書きするか、`.template` 付きの別ファイルに書き出すか。
    pub output_mode: OutputMode,
    /// 並列に処理するファイル数の上限。`None` なら rayon のデフォルト。
    pub jobs: Option<usize>,
}

/// バッチ変換の結果。入力と同じ順序で並ぶ。
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 変換に成功したファイルの書き出し先。
    pub converted: Vec<PathBuf>,
    /// 変換に失敗した入力ファイルとその理由。
    pub failed: Vec<(PathBuf, AppError)>,
}

impl BatchReport {
    /// 失敗が1件も無ければ成功。入力が空の場合も成功とする。
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// プロセスの終了コード (成功: 0, 1件でも失敗: 1)。
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

// --- public な関数 ---

/// 色指定文字列から塗りつぶし色を決定します。
///
/// 指定が無ければ黒。解析に失敗した場合も警告を出したうえで黒を使い、処理は続行します。
pub fn resolve_fill_color(hex: Option<&str>) -> RgbColor {
    match hex {
        None => RgbColor::BLACK,
        Some(hex) => parse_hex_color(hex).unwrap_or_else(|e| {
            warn!("{}。デフォルト色 {} を使用します。", e, RgbColor::BLACK);
            RgbColor::BLACK
        }),
    }
}

/// 1ファイルをテンプレート画像に変換して保存し、書き出し先のパスを返します。
pub fn convert_file(source: &PngFilePath, config: &Config) -> Result<PathBuf, AppError> {
    // 1. 読み込みとデコード
    let bytes = source.read_bytes()?;
    let mut image = RasterImage::decode(&bytes)?;

    // 2. 不透明ピクセルの書き換え
    recolor(&mut image, config.fill_color)?;

    // 3. PNG にエンコードしてアトミックに保存
    let destination = source.destination(config.output_mode);
    TemplatePng::create(&image)?.save_to_path(&destination, source.as_path())?;

    Ok(destination)
}

/// 複数の PNG ファイルを並列に変換します。
///
/// 各ファイルの失敗はログに出して `BatchReport` に記録するだけで、他のファイルの処理は止めません。
///
/// # 戻り値
/// * `Ok(BatchReport)`: すべてのファイルを処理し終えた場合 (個別の失敗を含む)。
/// * `Err(AppError)`: `jobs` 指定のスレッドプールを作成できなかった場合。
pub fn run(inputs: &[PngFilePath], config: &Config) -> Result<BatchReport, AppError> {
    info!(
        "処理を開始します: {} 件 (塗りつぶし色 {})",
        inputs.len(),
        config.fill_color
    );

    let results: Vec<(PathBuf, Result<PathBuf, AppError>)> = match config.jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs.max(1))
                .build()?;
            pool.install(|| convert_all(inputs, config))
        }
        None => convert_all(inputs, config),
    };

    let mut report = BatchReport::default();
    for (source, result) in results {
        match result {
            Ok(destination) => {
                info!("  -> 完了: {} を生成しました。", destination.display());
                report.converted.push(destination);
            }
            Err(e) => {
                // 1ファイルの失敗ではバッチ全体を止めない
                error!("'{}' の変換中にエラーが発生しました: {}", source.display(), e);
                report.failed.push((source, e));
            }
        }
    }

    info!(
        "すべての処理が完了しました。成功 {} 件、失敗 {} 件",
        report.converted.len(),
        report.failed.len()
    );
    Ok(report)
}

// --- private なヘルパー関数 ---

fn convert_all(
    inputs: &[PngFilePath],
    config: &Config,
) -> Vec<(PathBuf, Result<PathBuf, AppError>)> {
    inputs
        .par_iter()
        .map(|source| (source.as_path().to_path_buf(), convert_file(source, config)))
        .collect()
}
