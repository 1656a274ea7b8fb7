//! Elementa CLI entry point

use std::process::ExitCode;

use clap::Parser;

use elementa::cli::{
    app::{
        load_merged_config, run_delete, run_element, run_list, run_move, run_prompt, run_show,
        run_write, EXIT_ERROR,
    },
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    record_cmd::{run_record, run_scripted, RecordOptions},
};
use elementa::domain::config::AppConfig;
use elementa::infrastructure::XdgConfigStore;
use elementa::logging;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    logging::init();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    let cli_config = AppConfig {
        data_dir: cli.data_dir.clone(),
        ..Default::default()
    };
    let config = load_merged_config(cli_config).await;

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Write { element, text } => {
            run_write(&config, element.map(Into::into), &text).await
        }
        Commands::List { folder, json } => run_list(&config, folder.map(Into::into), json).await,
        Commands::Show { id } => run_show(&config, id).await,
        Commands::Delete { id } => run_delete(&config, id).await,
        Commands::Move { id, folder } => run_move(&config, id, folder.into()).await,
        Commands::Prompt { element } => run_prompt(&config, element.map(Into::into)),
        Commands::Element { element } => run_element(element.into()),
        Commands::Record {
            element,
            script,
            no_save,
        } => {
            let element = element
                .map(Into::into)
                .unwrap_or_else(|| config.default_element_or_default());
            match script {
                Some(script) => run_scripted(&config, element, &script).await,
                None => {
                    let options = RecordOptions {
                        element,
                        save_audio: config.save_audio_or_default() && !no_save,
                    };
                    run_record(&config, options).await
                }
            }
        }
    }
}
