//! Contains the opnode CLI.

use crate::{
    commands::{DeriveCommand, NodeCommand},
    flags::{GlobalArgs, init_unified_metrics},
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use opnode_cli::cli_styles;
use std::{future::Future, pin::pin};
use tokio_util::sync::CancellationToken;

/// Subcommands for the CLI.
#[derive(Debug, PartialEq, Eq, Clone, Subcommand)]
pub enum Commands {
    /// Follows the L1 head and derives L2 block inputs.
    #[command(alias = "n")]
    Node(NodeCommand),
    /// Derives the L2 block inputs of a single L1 block.
    #[command(alias = "d")]
    Derive(DeriveCommand),
}

/// The opnode CLI.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, styles = cli_styles(), long_about = None)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub subcommand: Commands,
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub global: GlobalArgs,
}

impl Cli {
    /// Runs the CLI.
    pub fn run(self) -> Result<()> {
        init_unified_metrics(&self.global.metrics)?;

        match self.subcommand {
            Commands::Node(ref node) => node.init_logs(&self.global)?,
            Commands::Derive(ref derive) => derive.init_logs(&self.global)?,
        }

        match self.subcommand {
            Commands::Node(node) => {
                Self::run_until_ctrl_c(|cancellation| node.run(&self.global, cancellation))
            }
            Commands::Derive(derive) => Self::run_until_ctrl_c(|_| derive.run(&self.global)),
        }
    }

    /// Run until the future completes or ctrl-c is pressed.
    ///
    /// On ctrl-c the token handed to `run` is cancelled and the future is awaited so it can
    /// shut down on its own.
    pub fn run_until_ctrl_c<F, Fut>(run: F) -> Result<()>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let rt = Self::tokio_runtime()?;
        let cancellation = CancellationToken::new();
        rt.block_on(async move {
            let mut fut = pin!(run(cancellation.clone()));
            tokio::select! {
                res = &mut fut => res,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!(target: "cli", "Received Ctrl-C, shutting down...");
                    cancellation.cancel();
                    fut.await
                }
            }
        })
    }

    /// Creates a new default tokio multi-thread [Runtime](tokio::runtime::Runtime) with all
    /// features enabled
    pub fn tokio_runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
        tokio::runtime::Builder::new_multi_thread().enable_all().build()
    }
}
