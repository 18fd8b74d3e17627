//! Commands for the social API: feed, posts, friends, groups, users and
//! push devices.

use std::io::Write;

use clap::{Args, Subcommand};
use friendlines_domain::{
    AcceptFriendRequest, CreateGroup, CreateNewsflash, DEFAULT_PAGE_SIZE, DevicePlatform,
    GroupUpdate, InviteToGroup, PageRequest, RegisterDevice, SendFriendRequest, UserSearch,
};
use serde::Serialize;

use crate::context::ApiClient;

/// Paging options shared by list commands
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Items per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: u32,
}

impl PageArgs {
    fn request(self) -> anyhow::Result<PageRequest> {
        Ok(PageRequest::new(self.page, self.limit)?)
    }
}

/// Friend subcommands
#[derive(Debug, Subcommand)]
pub enum FriendsCommand {
    /// List your friends
    List(PageArgs),
    /// List friend requests waiting for your answer
    Pending(PageArgs),
    /// Send a friend request
    Add {
        /// Id of the user to befriend
        user_id: String,
    },
    /// Accept a friend request
    Accept {
        /// Id of the friend request (not of the user)
        request_id: String,
    },
}

/// Group subcommands
#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// List the groups you belong to
    List(PageArgs),
    /// Show one group
    Show {
        /// Group id
        group_id: String,
    },
    /// Create a group
    Create {
        /// Group name
        name: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },
    /// Rename a group or change its description
    Update {
        /// Group id
        group_id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a group
    Delete {
        /// Group id
        group_id: String,
    },
    /// Invite a user into a group
    Invite {
        /// Group id
        group_id: String,
        /// Id of the invited user
        user_id: String,
    },
    /// Show a group's newsflashes
    Feed {
        /// Group id
        group_id: String,
        #[command(flatten)]
        paging: PageArgs,
    },
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Search users
    Search {
        /// Search text
        query: String,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Show a profile (your own without an id)
    Profile {
        /// User id
        user_id: Option<String>,
    },
    /// Show a user's newsflashes
    Posts {
        /// User id
        user_id: String,
        #[command(flatten)]
        paging: PageArgs,
    },
}

/// Device subcommands
#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// Register a push token for this device
    Register {
        /// Push token issued by the platform
        token: String,
        /// ios, android or web
        #[arg(long, default_value = "web")]
        platform: DevicePlatform,
    },
}

/// Show the newsflash feed.
pub(crate) async fn feed(
    api: &ApiClient,
    paging: PageArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let page = api.newsflashes().my_feed(paging.request()?).await?;
    print_json(out, &page)
}

/// Post a newsflash to friends, or to a group.
pub(crate) async fn post(
    api: &ApiClient,
    content: &str,
    group: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let body = match group {
        Some(group_id) => CreateNewsflash::to_group(content, group_id)?,
        None => CreateNewsflash::to_friends(content)?,
    };
    let newsflash = api.newsflashes().create(&body).await?;
    writeln!(out, "Posted newsflash {}", newsflash.id)?;
    Ok(())
}

impl FriendsCommand {
    pub(crate) async fn run(&self, api: &ApiClient, out: &mut impl Write) -> anyhow::Result<()> {
        let friendships = api.friendships();
        match self {
            Self::List(paging) => print_json(out, &friendships.list(paging.request()?).await?),
            Self::Pending(paging) => {
                print_json(out, &friendships.pending(paging.request()?).await?)
            }
            Self::Add { user_id } => {
                friendships
                    .send_request(&SendFriendRequest::new(user_id)?)
                    .await?;
                writeln!(out, "Friend request sent to {user_id}")?;
                Ok(())
            }
            Self::Accept { request_id } => {
                friendships
                    .accept(&AcceptFriendRequest::new(request_id)?)
                    .await?;
                writeln!(out, "Friend request {request_id} accepted")?;
                Ok(())
            }
        }
    }
}

impl GroupsCommand {
    pub(crate) async fn run(&self, api: &ApiClient, out: &mut impl Write) -> anyhow::Result<()> {
        let groups = api.groups();
        match self {
            Self::List(paging) => print_json(out, &groups.mine(paging.request()?).await?),
            Self::Show { group_id } => print_json(out, &groups.get(group_id).await?),
            Self::Create { name, description } => {
                let group = groups
                    .create(&CreateGroup::new(name, description.clone())?)
                    .await?;
                writeln!(out, "Created group {} ({})", group.name, group.id)?;
                Ok(())
            }
            Self::Update {
                group_id,
                name,
                description,
            } => {
                let update = GroupUpdate::new(name.clone(), description.clone())?;
                groups.update(group_id, &update).await?;
                writeln!(out, "Updated group {group_id}")?;
                Ok(())
            }
            Self::Delete { group_id } => {
                groups.delete(group_id).await?;
                writeln!(out, "Deleted group {group_id}")?;
                Ok(())
            }
            Self::Invite { group_id, user_id } => {
                groups
                    .invite(&InviteToGroup::new(group_id, user_id)?)
                    .await?;
                writeln!(out, "Invited {user_id} to {group_id}")?;
                Ok(())
            }
            Self::Feed { group_id, paging } => {
                print_json(out, &groups.feed(group_id, paging.request()?).await?)
            }
        }
    }
}

impl UsersCommand {
    pub(crate) async fn run(&self, api: &ApiClient, out: &mut impl Write) -> anyhow::Result<()> {
        let users = api.users();
        match self {
            Self::Search { query, paging } => {
                let search = UserSearch::new(query, paging.request()?)?;
                print_json(out, &users.search(&search).await?)
            }
            Self::Profile { user_id: Some(user_id) } => {
                print_json(out, &users.profile(user_id).await?)
            }
            Self::Profile { user_id: None } => print_json(out, &users.my_profile().await?),
            Self::Posts { user_id, paging } => {
                print_json(out, &users.newsflashes(user_id, paging.request()?).await?)
            }
        }
    }
}

impl DeviceCommand {
    pub(crate) async fn run(&self, api: &ApiClient, out: &mut impl Write) -> anyhow::Result<()> {
        match self {
            Self::Register { token, platform } => {
                let device = api
                    .notifications()
                    .register_device(&RegisterDevice::new(token, *platform)?)
                    .await?;
                writeln!(out, "Registered {} device {}", device.platform, device.id)?;
                Ok(())
            }
        }
    }
}

fn print_json(out: &mut impl Write, value: &impl Serialize) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
