//! Subcommand handlers.

use std::path::Path;

use embedcmp_embeddings::{
    EmbedConfig, EmbeddingError, MissingOperand, Result, Workbench, export_embedding,
};
use tracing::info;

use crate::args::{Command, ReferenceCommand};
use crate::output;

pub async fn run(command: Command, config: &EmbedConfig) -> Result<()> {
    let mut bench = Workbench::from_config(config).await?;

    match command {
        Command::Embed {
            file,
            save,
            compare,
            export,
            full,
        } => {
            embed_file(&mut bench, &file, full).await?;
            if compare {
                println!("{}", output::comparison(&bench.compare()?));
            }
            if save {
                let saved = bench.save_reference().await?;
                println!("saved reference: {}", saved.label);
            }
            if let Some(dir) = export {
                let path = bench.export_current(&dir).await?;
                println!("exported: {}", path.display());
            }
        }
        Command::Compare { file } => {
            if bench.stored().is_none() {
                return Err(EmbeddingError::MissingOperand(MissingOperand::Stored));
            }
            embed_file(&mut bench, &file, false).await?;
            println!("{}", output::comparison(&bench.compare()?));
        }
        Command::Reference { action } => reference(&mut bench, action).await?,
    }

    Ok(())
}

async fn embed_file(bench: &mut Workbench, file: &Path, full: bool) -> Result<()> {
    if let Some(e) = bench.initialization_error() {
        return Err(e);
    }

    bench.select_source(file).await?;
    let outcome = bench
        .embed()
        .await?
        .ok_or_else(|| EmbeddingError::ApiRequest("a request is already in flight".to_string()))?;

    println!("{}", output::outcome(&outcome, full));
    Ok(())
}

async fn reference(bench: &mut Workbench, action: ReferenceCommand) -> Result<()> {
    match action {
        ReferenceCommand::Show { full } => match bench.stored() {
            Some(stored) => println!("{}", output::embedding(stored, full)),
            None => println!("no reference stored at {}", bench.store_path().display()),
        },
        ReferenceCommand::Clear => {
            bench.clear_reference().await?;
            info!("Reference cleared");
            println!("reference cleared");
        }
        ReferenceCommand::Export { dir } => {
            let stored = bench
                .stored()
                .ok_or(EmbeddingError::MissingOperand(MissingOperand::Stored))?;
            let path = export_embedding(stored, &dir).await?;
            println!("exported: {}", path.display());
        }
    }
    Ok(())
}
