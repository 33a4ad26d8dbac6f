// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::DataverseGenOptions;
use crate::config::DEFAULT_CONFIG_FILE;
use crate::file_service::FileMetadataService;
use crate::model::SchemaGraph;
use crate::schema_model::SchemaModel;
use crate::Error;
use clap::Subcommand;
use dataverse_gen_core::AccessToken;
use dataverse_gen_core::MetadataService;
use dataverse_gen_service_http::reqwest::Client;
use dataverse_gen_service_http::CacheSettings;
use dataverse_gen_service_http::HttpMetadataService;
use serde_json::to_string_pretty;
use std::env::var;
use std::fs::write;
use std::path::Path;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_OUTPUT: &str = "dataverse-gen-schema.json";
pub const DEFAULT_TOKEN_VAR: &str = "DATAVERSE_TOKEN";

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the schema model from local files.
    Model {
        /// EDMX document (`$metadata` response).
        #[arg(short, long)]
        edmx: PathBuf,
        /// Directory with `<logicalname>.json` entity metadata files.
        #[arg(short, long)]
        metadata_dir: PathBuf,
        /// Generator options.
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Output file for the schema model JSON.
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },
    /// Build the schema model from a Dataverse environment.
    Fetch {
        /// Environment url, e.g. `https://org.crm.dynamics.com`.
        #[arg(short, long)]
        server: String,
        /// Environment variable holding the bearer token.
        #[arg(short, long, default_value = DEFAULT_TOKEN_VAR)]
        token_var: String,
        /// Generator options.
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Output file for the schema model JSON.
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Keep the EDMX cache in memory instead of `cds-edmx.xml`.
        #[arg(long)]
        no_edmx_file: bool,
    },
}

/// Run `command`. Returns messages for the user.
///
/// # Errors
///
/// Any configuration, service, model or output error.
pub async fn process_command(command: &Commands) -> Result<Vec<String>, Error> {
    let mut display_output = Vec::new();
    match command {
        Commands::Model {
            edmx,
            metadata_dir,
            config,
            output,
        } => {
            let options = DataverseGenOptions::read(config).map_err(Error::Config)?;
            let service = FileMetadataService::new(edmx, metadata_dir);
            let graph = build(service, options).await?;
            write_graph(&graph, output)?;
            display_output.push(format!("{} file has been written", output.display()));
        }
        Commands::Fetch {
            server,
            token_var,
            config,
            output,
            no_edmx_file,
        } => {
            let options = DataverseGenOptions::read(config).map_err(Error::Config)?;
            let server = Url::parse(server).map_err(|_| Error::InvalidServerUrl(server.clone()))?;
            let token = var(token_var).map_err(|_| Error::MissingToken(token_var.clone()))?;
            let client = Client::new().map_err(|err| Error::HttpClient(Box::new(err)))?;
            let cache_settings = if *no_edmx_file {
                CacheSettings::in_memory()
            } else {
                CacheSettings::default()
            };
            let service =
                HttpMetadataService::new(client, server, AccessToken::new(token), cache_settings);
            let graph = build(service, options).await?;
            write_graph(&graph, output)?;
            display_output.push(format!("{} file has been written", output.display()));
        }
    }
    Ok(display_output)
}

async fn build<S>(service: S, options: DataverseGenOptions) -> Result<SchemaGraph, Error>
where
    S: MetadataService,
    S::Error: 'static,
{
    let mut model = SchemaModel::new(service, options);
    model.generate().await.map_err(Error::Model)?;
    Ok(model.into_graph())
}

fn write_graph(graph: &SchemaGraph, output: &Path) -> Result<(), Error> {
    let json = to_string_pretty(graph).map_err(Error::Serialize)?;
    write(output, json).map_err(|err| Error::WriteOutput(output.to_path_buf(), err))
}
