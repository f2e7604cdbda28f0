//
//  exonet-api
//  cli/record.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! DNS record commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::output::ResourceDetail;
use crate::structures::{Resource, ResourceIdentifier};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct RecordCommand {
    #[command(subcommand)]
    pub command: RecordSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RecordSubcommand {
    /// Create a record in a zone
    Create(CreateArgs),

    /// Change the content or TTL of a record
    Edit(EditArgs),

    /// Delete a record
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Id of the zone the record belongs to
    pub zone_id: String,

    /// Record type, e.g. A, AAAA, CNAME, MX, TXT
    #[arg(long = "type", short = 't')]
    pub record_type: String,

    /// Record name relative to the zone, e.g. www or @
    #[arg(long, short = 'n')]
    pub name: String,

    /// Record content, e.g. an IP address
    #[arg(long, short = 'c')]
    pub content: String,

    /// Time to live in seconds
    #[arg(long, default_value = "3600")]
    pub ttl: u32,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Record id
    pub id: String,

    #[arg(long, short = 'c')]
    pub content: Option<String>,

    #[arg(long)]
    pub ttl: Option<u32>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Record id
    pub id: String,
}

/// Builds the `dns_records` resource for a new record.
pub(crate) fn new_record(args: &CreateArgs) -> Resource {
    let mut record = Resource::new("dns_records");
    record
        .set_attribute("type", args.record_type.to_uppercase())
        .set_attribute("name", args.name.as_str())
        .set_attribute("content", args.content.as_str())
        .set_attribute("ttl", args.ttl)
        .set_relationship("zone", ResourceIdentifier::new("dns_zones", args.zone_id.as_str()));
    record
}

impl RecordCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RecordSubcommand::Create(args) => self.create(args, global).await,
            RecordSubcommand::Edit(args) => self.edit(args, global).await,
            RecordSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;

        let created = new_record(args).post(&client).await?.into_resource()?;

        let output = global.output();
        if !output.is_json() {
            output.write_success(&format!(
                "Created record {}",
                created.id().unwrap_or_default()
            ));
        }
        output.write(&ResourceDetail::new(
            &created,
            &[("Type", "type"), ("Name", "name"), ("Content", "content"), ("TTL", "ttl")],
        ))
    }

    async fn edit(&self, args: &EditArgs, global: &GlobalOptions) -> Result<()> {
        let output = global.output();
        if args.content.is_none() && args.ttl.is_none() {
            output.write_warning("Nothing to change; pass --content and/or --ttl");
            return Ok(());
        }

        let client = global.client()?;
        let mut record = Resource::with_id("dns_records", args.id.as_str());
        if let Some(content) = &args.content {
            record.set_attribute("content", content.as_str());
        }
        if let Some(ttl) = args.ttl {
            record.set_attribute("ttl", ttl);
        }
        record.patch(&client).await?;

        output.write_success(&format!("Updated record {}", args.id));
        Ok(())
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        client.identifier("dns_records", &args.id).delete(&client).await?;

        global
            .output()
            .write_success(&format!("Deleted record {}", args.id));
        Ok(())
    }
}
