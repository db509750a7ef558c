mod cli;

use clap::Parser;
use cli::Args;
use png_template_maker::domain::input_source::png_file_path::select_png_inputs;
use png_template_maker::workflow;
use std::process::ExitCode;
use tracing::{error, Level};

fn main() -> ExitCode {
    // コマンドライン引数を解析します
    let args = Args::parse();

    // ログの出力先は標準エラー
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = args.to_config();
    let inputs = select_png_inputs(&args.inputs);

    match workflow::run(&inputs, &config) {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(e) => {
            error!("エラー: {}", e);
            ExitCode::FAILURE
        }
    }
}
