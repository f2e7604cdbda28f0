//
//  exonet-api
//  cli/zone.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! DNS zone commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config;
use crate::output::{print_header, Column, ResourceDetail, ResourceTable};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ZoneCommand {
    #[command(subcommand)]
    pub command: ZoneSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ZoneSubcommand {
    /// List DNS zones
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a zone and its records
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Number of zones per page
    #[arg(long, short = 's')]
    pub size: Option<u32>,

    /// Page number, starting at 1
    #[arg(long, short = 'p')]
    pub page: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Zone id
    pub id: String,
}

pub(crate) fn record_columns() -> Vec<Column> {
    vec![
        Column::new("Type", "type"),
        Column::new("Name", "name"),
        Column::new("Content", "content").width(40),
        Column::new("TTL", "ttl"),
    ]
}

impl ZoneCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ZoneSubcommand::List(args) => self.list(args, global).await,
            ZoneSubcommand::View(args) => self.view(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = global.client_with(&config)?;

        let mut request = client.resource("dns_zones");
        if let Some(size) = global.page_size(args.size, &config) {
            request = request.size(size);
        }
        if let Some(page) = args.page {
            request = request.page(page);
        }

        let zones = request.get().await?.into_set()?;
        global.output().write(&ResourceTable::new(
            &zones,
            vec![Column::new("Name", "name"), Column::new("Hostmaster", "hostmaster")],
        ))
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;

        let zone = client.resource("dns_zones").find(&args.id).await?.into_resource()?;
        let records = zone.related("records").get(&client).await?.into_set()?;

        let output = global.output();
        if output.is_json() {
            let result = serde_json::json!({
                "zone": serde_json::to_value(ResourceDetail::new(&zone, &[]))?,
                "records": serde_json::to_value(ResourceTable::new(&records, Vec::new()))?,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        output.write(&ResourceDetail::new(&zone, &[]))?;
        println!();
        print_header("Records");
        output.write(&ResourceTable::new(&records, record_columns()))
    }
}
