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

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]

mod database;
pub mod opt;
mod reconcile;

use crate::{
    database::postgres::run_database_command,
    opt::{Commands, MeridianCli},
    reconcile::{run_reconcile_command, run_sync_command},
};

pub async fn run(opt: MeridianCli) -> anyhow::Result<()> {
    match opt.command {
        Commands::Database(database_opt) => run_database_command(database_opt).await?,
        Commands::Reconcile(reconcile_opt) => run_reconcile_command(reconcile_opt).await?,
        Commands::Sync { ids, database } => run_sync_command(ids, database).await?,
    }
    Ok(())
}
