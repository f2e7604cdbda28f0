//
//  exonet-api
//  cli/ticket.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Support ticket commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Config;
use crate::output::{print_header, Column, ResourceDetail, ResourceTable};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct TicketCommand {
    #[command(subcommand)]
    pub command: TicketSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TicketSubcommand {
    /// List tickets
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a ticket and its emails
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only open tickets
    #[arg(long, short = 'o')]
    pub open: bool,

    /// Number of tickets per page
    #[arg(long, short = 's')]
    pub size: Option<u32>,

    /// Page number, starting at 1
    #[arg(long, short = 'p')]
    pub page: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Ticket id
    pub id: String,

    /// Also show the emails of the ticket
    #[arg(long, short = 'e')]
    pub emails: bool,
}

impl TicketCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            TicketSubcommand::List(args) => self.list(args, global).await,
            TicketSubcommand::View(args) => self.view(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = global.client_with(&config)?;

        let mut request = client.resource("tickets");
        if args.open {
            request = request.filter("open");
        }
        if let Some(size) = global.page_size(args.size, &config) {
            request = request.size(size);
        }
        if let Some(page) = args.page {
            request = request.page(page);
        }

        let tickets = request.get().await?.into_set()?;
        global.output().write(&ResourceTable::new(
            &tickets,
            vec![
                Column::new("Subject", "last_message_subject").width(60),
                Column::new("Department", "department"),
                Column::new("Status", "status"),
            ],
        ))
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();

        let ticket = client.resource("tickets").find(&args.id).await?.into_resource()?;
        output.write(&ResourceDetail::new(&ticket, &[]))?;

        if args.emails {
            let emails = ticket.related("emails").get(&client).await?.into_set()?;
            if !output.is_json() {
                println!();
                print_header("Emails");
            }
            output.write(&ResourceTable::new(
                &emails,
                vec![
                    Column::new("From", "from"),
                    Column::new("Subject", "subject").width(60),
                ],
            ))?;
        }

        Ok(())
    }
}
