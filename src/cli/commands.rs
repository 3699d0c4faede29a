// CLI command definitions

use super::chart::{GenerateCommand, ListCommand, ValidateCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "charted-kube",
    version,
    about = "Kubernetes manifest generator for multi-environment configuration",
    long_about = "Resolves layered component configuration (chart file + CI environment variables) into Kubernetes manifests"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate manifests for every component in one environment
    Generate(GenerateCommand),

    /// Validate component configuration without generating manifests
    Validate(ValidateCommand),

    /// List components and environments declared in a chart file
    List(ListCommand),
}
