use clap::Parser;
use png_template_maker::domain::input_source::output_path::OutputMode;
use png_template_maker::workflow::{resolve_fill_color, Config};
use std::path::PathBuf;

/// PNG画像の不透明ピクセルを単色で塗りつぶし、テンプレート画像を生成するツール
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 変換するPNGファイルのパス (拡張子が .png の既存ファイル以外は無視されます)
    pub inputs: Vec<PathBuf>,

    /// 塗りつぶし色 (16進数字 1, 2, 3, 6 桁。省略時・不正時は黒)
    #[arg(short, long, env = "TEMPLATE_FILL_COLOR")]
    pub color: Option<String>,

    /// 元のファイルを上書きする (指定しない場合は <名前>.template.png に書き出す)
    #[arg(short, long)]
    pub overwrite: bool,

    /// 並列に処理するファイル数
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// デバッグログを表示する
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// ワークフローに渡す設定を組み立てる。色の解析に失敗した場合は黒になる。
    pub fn to_config(&self) -> Config {
        Config {
            fill_color: resolve_fill_color(self.color.as_deref()),
            output_mode: OutputMode::from_overwrite_flag(self.overwrite),
            jobs: self.jobs,
        }
    }
}
