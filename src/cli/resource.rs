//
//  exonet-api
//  cli/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Generic resource commands
//!
//! Work with any resource type the API exposes, for example:
//!
//! ```text
//! exonet resource get dns_records --filter type=A,AAAA --all
//! exonet resource get tickets 1k2R8aK5Wr3Q
//! exonet resource delete dns_records Yd4Ew9q2dPrZ
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::{Client, Request};
use crate::config::Config;
use crate::output::{entry_json, write_json, ResourceDetail, ResourceTable};
use crate::structures::{Document, Entry};
use crate::util::parse_filter;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ResourceCommand {
    #[command(subcommand)]
    pub command: ResourceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ResourceSubcommand {
    /// Fetch a resource, or a page of a collection
    Get(GetArgs),

    /// Delete a resource
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Resource type, e.g. dns_zones
    pub resource_type: String,

    /// Resource id; without it the collection is listed
    pub id: Option<String>,

    /// Filter as name or name=value; repeatable
    #[arg(long, short = 'f')]
    pub filter: Vec<String>,

    /// Number of resources per page
    #[arg(long, short = 's')]
    pub size: Option<u32>,

    /// Page number, starting at 1
    #[arg(long, short = 'p')]
    pub page: Option<u32>,

    /// Follow pagination links and fetch every page
    #[arg(long, conflicts_with_all = ["id", "page"])]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Resource type, e.g. dns_records
    pub resource_type: String,

    /// Resource id
    pub id: String,
}

/// Turns the command-line arguments into a request.
pub(crate) fn build_request(client: &Client, args: &GetArgs, page_size: Option<u32>) -> Request {
    let mut request = client.resource(&args.resource_type);
    if let Some(size) = page_size {
        request = request.size(size);
    }
    if let Some(page) = args.page {
        request = request.page(page);
    }
    for filter in &args.filter {
        request = match parse_filter(filter) {
            (name, Some(value)) => request.filter_value(name, value),
            (name, None) => request.filter(name),
        };
    }
    request
}

impl ResourceCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ResourceSubcommand::Get(args) => self.get(args, global).await,
            ResourceSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = global.client_with(&config)?;
        let request = build_request(&client, args, global.page_size(args.size, &config));
        let output = global.output();

        if args.all {
            let set = request.get_all().await?;
            return output.write(&ResourceTable::new(&set, Vec::new()));
        }

        let document = match &args.id {
            Some(id) => request.find(id).await?,
            None => request.get().await?,
        };

        match document {
            Document::Set(set) => output.write(&ResourceTable::new(&set, Vec::new())),
            Document::Resource(resource) => output.write(&ResourceDetail::new(&resource, &[])),
            Document::Identifier(identifier) => {
                let entry = Entry::from(identifier);
                if output.is_json() {
                    return write_json(&entry_json(&entry));
                }
                output.write_info(&format!(
                    "{} {}",
                    entry.resource_type(),
                    entry.id().unwrap_or_default()
                ));
                Ok(())
            }
        }
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        client
            .identifier(&args.resource_type, &args.id)
            .delete(&client)
            .await?;

        global.output().write_success(&format!(
            "Deleted {} {}",
            args.resource_type, args.id
        ));
        Ok(())
    }
}
