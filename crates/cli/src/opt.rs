// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use clap::Parser;

/// Main CLI structure for parsing command-line arguments and options.
///
/// This is the entry point for the Meridian command-line interface, providing
/// access to database management and reconciliation commands.
#[derive(Debug, Parser)]
#[clap(version, about, author)]
pub struct MeridianCli {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available top-level commands for the Meridian CLI.
#[derive(Parser, Debug)]
pub enum Commands {
    Database(DatabaseOpt),
    Reconcile(ReconcileOpt),
    /// Replays missing payments from the processor into the internal ledger.
    Sync {
        /// Processor payment identifiers to replay.
        #[arg(long, required = true, num_args = 1.., value_delimiter = ',')]
        ids: Vec<String>,
        /// Database configuration options
        #[clap(flatten)]
        database: DatabaseConfig,
    },
}

/// Database management options and subcommands.
#[derive(Parser, Debug)]
#[command(about = "Postgres database operations", long_about = None)]
pub struct DatabaseOpt {
    #[clap(subcommand)]
    pub command: DatabaseCommand,
}

/// Configuration parameters for database connection and operations.
#[derive(Parser, Debug, Clone)]
pub struct DatabaseConfig {
    /// Hostname or IP address of the database server.
    #[arg(long)]
    pub host: Option<String>,
    /// Port number of the database server.
    #[arg(long)]
    pub port: Option<u16>,
    /// Username for connecting to the database.
    #[arg(long)]
    pub username: Option<String>,
    /// Name of the database.
    #[arg(long)]
    pub database: Option<String>,
    /// Password for connecting to the database.
    #[arg(long)]
    pub password: Option<String>,
}

/// Available database management commands.
#[derive(Parser, Debug, Clone)]
#[command(about = "Postgres database operations", long_about = None)]
pub enum DatabaseCommand {
    /// Initializes a new Postgres database with the latest schema.
    Init(DatabaseConfig),
    /// Deletes all reconciliation data from the database.
    Drop(DatabaseConfig),
}

/// Reconciliation options and subcommands.
#[derive(Parser, Debug)]
#[command(about = "Billing reconciliation runs", long_about = None)]
pub struct ReconcileOpt {
    #[clap(subcommand)]
    pub command: ReconcileCommand,
}

/// Available reconciliation commands.
#[derive(Parser, Debug, Clone)]
#[command(about = "Billing reconciliation runs", long_about = None)]
pub enum ReconcileCommand {
    /// Runs a reconciliation for an explicit settled-time window.
    Run {
        /// Inclusive start of the window (RFC 3339, e.g. 2025-03-14T00:00:00Z).
        #[arg(long)]
        start: DateTime<Utc>,
        /// End of the window (RFC 3339).
        #[arg(long)]
        end: DateTime<Utc>,
        /// Aggregate discrepancy tolerance as a fraction of the processor total.
        #[arg(long)]
        tolerance: Option<f64>,
        /// Excludes refunds from both totals.
        #[arg(long)]
        no_refunds: bool,
        /// Database configuration options
        #[clap(flatten)]
        database: DatabaseConfig,
    },
    /// Runs the scheduled daily reconciliation for yesterday's UTC calendar day.
    Daily {
        /// Database configuration options
        #[clap(flatten)]
        database: DatabaseConfig,
    },
}
