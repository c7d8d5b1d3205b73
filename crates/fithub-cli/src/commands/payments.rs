use anyhow::Result;
use clap::{Args, Subcommand};

use fithub_db::Connection;
use fithub_domain::{Member, MemberFilter, Query};
use fithub_membership::MemberList;

use crate::commands::store_failure;
use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Payments {
    /// List members with pending or overdue fees
    #[clap(name = "pending")]
    Pending(ListPending),
}

impl Payments {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Payments::Pending(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListPending {
    /// Search name, email and unique id
    #[clap(short, long)]
    pub query: Option<String>,
}

impl ListPending {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let members: Vec<Member> = db
            .query(&MemberFilter::default())
            .await
            .map_err(store_failure("load members"))?;
        let list = MemberList::new(members);
        let list = match self.query.as_deref() {
            Some(query) => MemberList::new(list.search(query)),
            None => list,
        };

        let pending = list.pending_payments();
        println!("{} pending payments.", pending.len());
        pending.print_formatted();
        Ok(())
    }
}
