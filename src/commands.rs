use anyhow::{anyhow, bail, Context as _, Result};
use std::{fmt::Display, fs, path::Path, rc::Rc};
use time::{macros::format_description, OffsetDateTime};

use smartcity_core::{
    draft::{Draft, EventDraft},
    gateways::{AssistantGateway, EntityGateway, ImageGateway, ImageTarget},
    kinds::*,
    markers::{station_markers, MarkerActions},
    session::SessionManager,
    stats::StatsTracker,
    sync::{self, Removal, Synchronizer},
    validate::{Validate, ValidationErrors},
};
use smartcity_entities::{
    assistant::Answer, event::*, id::Id, session::Credentials, station::Station, stats::Stats,
    transport::Transport, user::User, zone::Zone,
};
use smartcity_frontend_api::Api;

use crate::{
    cli::{Command, Kind, Target},
    config::Config,
    confirm::TerminalConfirm,
    notify::ConsoleNotifier,
    session_store::JsonSessionStore,
};

/// How a kind is presented on the command line.
pub trait Listing: EntityKind {
    /// The draft a new record starts from.
    fn template() -> Self::Draft {
        Self::Draft::default()
    }
    fn row(record: &Self::Record) -> String;
}

fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.to_string())
}

impl Listing for Users {
    fn row(user: &User) -> String {
        let card = if user.subscription_card { "  subscription card" } else { "" };
        format!(
            "{}  {}  {}  age {}  {}{card}",
            user.id,
            user.name,
            user.kind,
            or_dash(user.age),
            or_dash(user.email.as_deref())
        )
    }
}

impl Listing for Transports {
    fn row(transport: &Transport) -> String {
        let electric = if transport.electric { "  electric" } else { "" };
        format!(
            "{}  {}  {}  capacity {}  {}  {} km/h{electric}",
            transport.id,
            transport.name,
            transport.kind,
            or_dash(transport.capacity),
            or_dash(transport.registration.as_deref()),
            or_dash(transport.max_speed)
        )
    }
}

impl Listing for Stations {
    fn row(station: &Station) -> String {
        format!(
            "{}  {}  {}  {}, {}",
            station.id,
            station.name,
            station.kind,
            or_dash(station.latitude),
            or_dash(station.longitude)
        )
    }
}

impl Listing for Events {
    fn template() -> EventDraft {
        EventDraft::on(today())
    }
    fn row(event: &Event) -> String {
        format!(
            "{}  {}  {}  severity {}/{MAX_SEVERITY}  {}",
            event.id,
            event.name,
            event.kind,
            or_dash(event.severity),
            or_dash(event.date.as_deref())
        )
    }
}

impl Listing for Zones {
    fn row(zone: &Zone) -> String {
        format!(
            "{}  {}  {}  {} km²  population {}",
            zone.id,
            zone.name,
            zone.kind,
            or_dash(zone.area),
            or_dash(zone.population)
        )
    }
}

fn today() -> String {
    OffsetDateTime::now_utc()
        .date()
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

/// The failure was already shown by the notifier.
pub fn is_notified(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<sync::Error>(),
        Some(sync::Error::Load(_) | sync::Error::Save(_) | sync::Error::Delete(_))
    )
}

struct Context {
    config: Config,
    api: Api,
    stats: Rc<StatsTracker>,
    notifier: Rc<ConsoleNotifier>,
}

impl Context {
    fn new(config: Config) -> Result<Self> {
        let url = config.api.base_url.clone();
        let api = match config.api.timeout {
            Some(timeout) => Api::with_timeout(url, timeout)?,
            None => Api::new(url),
        };
        log::debug!("Using the API at {}", api.url());
        Ok(Self {
            config,
            api,
            stats: Rc::new(StatsTracker::default()),
            notifier: Rc::new(ConsoleNotifier),
        })
    }

    fn synchronizer<K>(&self, assume_yes: bool) -> Synchronizer<K, &Api, TerminalConfirm>
    where
        K: EntityKind,
        Api: EntityGateway<K>,
    {
        let confirm = TerminalConfirm::new(assume_yes || self.config.confirm.assume_yes);
        Synchronizer::new(&self.api, confirm)
            .with_stats(self.stats.clone())
            .with_notifier(self.notifier.clone())
    }

    fn session(&self) -> Result<SessionManager<JsonSessionStore>> {
        let dir = &self.config.session.dir;
        let store = JsonSessionStore::try_new(dir)
            .with_context(|| format!("Unable to open the session store in {}", dir.display()))?;
        Ok(SessionManager::load(store))
    }

    async fn print_stats_if_stale(&self) {
        if !self.stats.is_stale() {
            return;
        }
        // a failure is logged by the tracker
        if let Ok(stats) = self.stats.reload_if_stale(&self.api).await {
            let Stats {
                users,
                transports,
                stations,
                events,
                zones,
                ..
            } = stats;
            println!(
                "Now {users} users, {transports} transports, {stations} stations, {events} events and {zones} zones"
            );
        }
    }
}

macro_rules! dispatch {
    ($kind:expr, $handler:ident($($arg:expr),*)) => {
        match $kind {
            Kind::Users => $handler::<Users>($($arg),*).await,
            Kind::Transports => $handler::<Transports>($($arg),*).await,
            Kind::Stations => $handler::<Stations>($($arg),*).await,
            Kind::Events => $handler::<Events>($($arg),*).await,
            Kind::Zones => $handler::<Zones>($($arg),*).await,
        }
    };
}

pub async fn run(command: Command, config: Config) -> Result<()> {
    let ctx = Context::new(config)?;
    match command {
        Command::List { kind, search } => dispatch!(kind, list(&ctx, search.as_deref())),
        Command::Create { kind, fields } => dispatch!(kind, create(&ctx, &fields)),
        Command::Update { kind, id, fields } => dispatch!(kind, update(&ctx, id.into(), &fields)),
        Command::Delete { kind, id, yes } => dispatch!(kind, delete(&ctx, id.into(), yes)),
        Command::Validate { kind, fields } => dispatch!(kind, validate(&fields)),
        Command::Stats => stats(&ctx).await,
        Command::Map => map(&ctx).await,
        Command::Login { email, password } => login(&ctx, Credentials { email, password }).await,
        Command::Logout => logout(&ctx),
        Command::Whoami => whoami(&ctx),
        Command::Ask { question } => ask(&ctx, &question.join(" ")).await,
        Command::Upload { target, file } => upload(&ctx, target, &file).await,
    }
}

fn draft_with<K: EntityKind>(mut draft: K::Draft, fields: &[(String, String)]) -> Result<K::Draft> {
    for (field, value) in fields {
        draft.set(field, value).map_err(|err| {
            anyhow!(
                "{err} (fields of a {}: {})",
                K::LABEL,
                <K::Draft as Draft>::FIELDS.join(", ")
            )
        })?;
    }
    Ok(draft)
}

fn print_errors(errors: &ValidationErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {field}: {message}");
    }
}

async fn list<K>(ctx: &Context, search: Option<&str>) -> Result<()>
where
    K: Listing,
    Api: EntityGateway<K>,
{
    let sync = ctx.synchronizer::<K>(false);
    sync.load().await?;
    let records = match search {
        Some(query) => sync.filtered(query),
        None => sync.records().to_vec(),
    };
    if records.is_empty() {
        println!("No {} found", K::RESOURCE);
    }
    for record in &records {
        println!("{}", K::row(record));
    }
    Ok(())
}

async fn submit<K>(ctx: &Context, sync: &Synchronizer<K, &Api, TerminalConfirm>) -> Result<()>
where
    K: Listing,
    Api: EntityGateway<K>,
{
    match sync.submit().await {
        Ok(_) => {
            ctx.print_stats_if_stale().await;
            Ok(())
        }
        Err(sync::Error::Invalid(errors)) => {
            print_errors(&errors);
            bail!("The {} is invalid", K::LABEL)
        }
        Err(err) => Err(err.into()),
    }
}

async fn create<K>(ctx: &Context, fields: &[(String, String)]) -> Result<()>
where
    K: Listing,
    Api: EntityGateway<K>,
{
    let draft = draft_with::<K>(K::template(), fields)?;
    let sync = ctx.synchronizer::<K>(false);
    sync.open_create_with(draft)?;
    submit(ctx, &sync).await
}

async fn update<K>(ctx: &Context, id: Id, fields: &[(String, String)]) -> Result<()>
where
    K: Listing,
    Api: EntityGateway<K>,
{
    let sync = ctx.synchronizer::<K>(false);
    sync.load().await?;
    let record = sync
        .find(&id)
        .ok_or_else(|| anyhow!("There is no {} with the id '{id}'", K::LABEL))?;
    let draft = draft_with::<K>(K::draft_from(&record), fields)?;
    sync.open_edit(&record)?;
    sync.update_draft(|d| *d = draft)?;
    submit(ctx, &sync).await
}

async fn delete<K>(ctx: &Context, id: Id, assume_yes: bool) -> Result<()>
where
    K: Listing,
    Api: EntityGateway<K>,
{
    let sync = ctx.synchronizer::<K>(assume_yes);
    match sync.remove(&id).await? {
        Removal::Deleted => ctx.print_stats_if_stale().await,
        Removal::Declined => println!("Nothing was deleted"),
    }
    Ok(())
}

async fn validate<K: Listing>(fields: &[(String, String)]) -> Result<()> {
    let draft = draft_with::<K>(K::template(), fields)?;
    let report = draft.report();
    if !report.valid {
        print_errors(&report.errors);
        bail!("The {} is invalid", K::LABEL);
    }
    println!("The {} is valid", K::LABEL);
    Ok(())
}

async fn stats(ctx: &Context) -> Result<()> {
    let Stats {
        users,
        transports,
        stations,
        events,
        zones,
        trips,
    } = ctx.stats.reload(&ctx.api).await?;
    println!("Users       {users}");
    println!("Transports  {transports}");
    println!("Stations    {stations}");
    println!("Events      {events}");
    println!("Zones       {zones}");
    println!("Trips       {trips}");
    Ok(())
}

async fn map(ctx: &Context) -> Result<()> {
    let sync = ctx.synchronizer::<Stations>(false);
    sync.load().await?;
    let actions = MarkerActions::new(
        |id| println!("    edit:   smartcity update stations {id} --set ..."),
        |id| println!("    delete: smartcity delete stations {id}"),
    );
    let markers = station_markers(&sync.records(), &actions);
    if markers.is_empty() {
        println!("No station has coordinates");
    }
    for marker in &markers {
        let link = sync.find(&marker.id).and_then(|s| s.maps_url());
        println!("{} ({})  {}", marker.title, marker.subtitle, or_dash(link));
        marker.edit();
        marker.delete();
    }
    Ok(())
}

async fn login(ctx: &Context, credentials: Credentials) -> Result<()> {
    let session = ctx.session()?.login(&ctx.api, credentials).await?;
    let user = &session.user;
    println!("Logged in as {} <{}> ({})", user.name, user.email, user.role);
    Ok(())
}

fn logout(ctx: &Context) -> Result<()> {
    ctx.session()?.logout()?;
    println!("Logged out");
    Ok(())
}

fn whoami(ctx: &Context) -> Result<()> {
    match ctx.session()?.current() {
        Some(session) => {
            let user = &session.user;
            println!("{} <{}> ({})", user.name, user.email, user.role);
            if let Some(image) = &session.profile_image {
                println!("Profile image: {image}");
            }
        }
        None => println!("Not logged in"),
    }
    Ok(())
}

async fn ask(ctx: &Context, question: &str) -> Result<()> {
    let Answer {
        question,
        generated_query,
        rows,
        explanation,
    } = ctx.api.natural_query(question).await?;
    println!("{question}");
    if let Some(query) = generated_query {
        println!("\n{query}\n");
    }
    for row in &rows {
        let cells: Vec<_> = row.iter().map(|(k, v)| format!("{k}={v}")).collect();
        println!("{}", cells.join("  "));
    }
    println!("{} results", rows.len());
    if let Some(explanation) = explanation {
        println!("\n{explanation}");
    }
    Ok(())
}

async fn upload(ctx: &Context, target: Target, file: &Path) -> Result<()> {
    let data = fs::read(file).with_context(|| format!("Unable to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image");
    let target = ImageTarget::from(target);
    let url = ctx.api.upload_image(target, file_name, data).await?;
    if target == ImageTarget::Profile {
        let session = ctx.session()?;
        if session.is_logged_in() {
            session.set_profile_image(&url)?;
        }
    }
    println!("{url}");
    Ok(())
}
