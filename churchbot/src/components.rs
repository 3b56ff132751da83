//! Component factory: opens the stores, builds the command table from config, and wires the
//! dispatcher and scheduler. Transport-agnostic; the caller supplies the [`Bot`].

use anyhow::{Context, Result};
use churchbot_core::{Bot, CallbackHandler, Handler};
use churchbot_storage::{init_data_dir, JsonStore, Stores};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use crate::config::BotConfig;
use crate::dispatcher::UpdateDispatcher;
use crate::fanout::{fan_out, Audience};
use crate::gate::AdminGate;
use crate::handlers::{
    AddEventHandler, AddIdHandler, BroadcastHandler, ChatIdHandler, ClearEventsHandler,
    EventsHandler, ListIdsHandler, MyIdHandler, PrayerHandler, PrayerListHandler, QuizHandler,
    RemoveIdHandler, StaticReplyHandler, TranslateHandler, UserTracker, QUIZ_LABELS,
};
use crate::reconciler::MembershipReconciler;
use crate::replies::{self, ADMIN_COPY, GROUP_COPY};
use crate::router::CommandRouter;
use crate::scheduler::Scheduler;
use crate::translate::{GoogleTranslator, Translator};

/// Everything the gateway and orchestrator need; produced by [`build_bot_components`].
pub struct BotComponents {
    pub stores: Stores,
    pub bot: Arc<dyn Bot>,
    pub dispatcher: Arc<UpdateDispatcher>,
    pub scheduler: Arc<Scheduler>,
}

/// Initializes the data directory, opens every store, and seeds configured admins.
#[instrument(skip(config), fields(data_dir = %config.data_dir().display()))]
pub async fn open_stores(config: &BotConfig) -> Result<Stores> {
    init_data_dir(config.data_dir())
        .await
        .context("Failed to initialize data directory")?;
    let stores = Stores::open(config.data_dir()).await;
    stores.seed_admins(config.admin_ids().iter().cloned()).await;
    Ok(stores)
}

fn open(handler: impl Handler + 'static) -> Option<Arc<dyn Handler>> {
    Some(Arc::new(handler))
}

fn admin_only(
    admins: &Arc<JsonStore<String>>,
    handler: impl Handler + 'static,
) -> Option<Arc<dyn Handler>> {
    Some(AdminGate::wrap(admins.clone(), Arc::new(handler)))
}

/// Builds the command and callback tables. Feature flags decide which optional handlers are
/// present; admin commands are wrapped in [`AdminGate`].
pub async fn build_router(
    config: &BotConfig,
    stores: &Stores,
    bot: Arc<dyn Bot>,
    translator: Arc<dyn Translator>,
) -> CommandRouter {
    let features = config.features();
    let admins = &stores.admins;

    let quiz = if features.quiz {
        Some(Arc::new(QuizHandler::load(bot.clone(), config.data_dir()).await))
    } else {
        None
    };

    let table: Vec<(&str, Option<Arc<dyn Handler>>)> = vec![
        ("start", open(StaticReplyHandler::new(replies::WELCOME))),
        ("cmd", open(StaticReplyHandler::new(replies::COMMAND_LIST))),
        ("verse", open(StaticReplyHandler::new(replies::VERSE))),
        ("prayer", open(PrayerHandler::new(stores.prayers.clone()))),
        ("prayerlist", open(PrayerListHandler::new(stores.prayers.clone()))),
        ("events", open(EventsHandler::new(stores.events.clone()))),
        (
            "daily_inspiration",
            open(StaticReplyHandler::new(replies::DAILY_INSPIRATION)),
        ),
        ("myid", open(MyIdHandler)),
        ("chatid", open(ChatIdHandler)),
        (
            "tran",
            features
                .translation
                .then(|| Arc::new(TranslateHandler::new(translator)) as Arc<dyn Handler>),
        ),
        ("quiz", quiz.clone().map(|q| q as Arc<dyn Handler>)),
        ("addadmin", admin_only(admins, AddIdHandler::new(admins.clone(), ADMIN_COPY))),
        ("listadmins", admin_only(admins, ListIdsHandler::new(admins.clone(), ADMIN_COPY))),
        ("deladmin", admin_only(admins, RemoveIdHandler::new(admins.clone(), ADMIN_COPY))),
        (
            "broadcast",
            admin_only(
                admins,
                BroadcastHandler::new(bot.clone(), stores.groups.clone(), Audience::Groups),
            )
            .filter(|_| features.broadcast),
        ),
        (
            "broadcast_users",
            admin_only(
                admins,
                BroadcastHandler::new(bot.clone(), stores.users.clone(), Audience::Users),
            )
            .filter(|_| features.broadcast),
        ),
        ("addevent", admin_only(admins, AddEventHandler::new(stores.events.clone()))),
        ("clearevents", admin_only(admins, ClearEventsHandler::new(stores.events.clone()))),
        ("addgroup", admin_only(admins, AddIdHandler::new(stores.groups.clone(), GROUP_COPY))),
        ("listgroups", admin_only(admins, ListIdsHandler::new(stores.groups.clone(), GROUP_COPY))),
        ("delgroup", admin_only(admins, RemoveIdHandler::new(stores.groups.clone(), GROUP_COPY))),
    ];

    let router = table
        .into_iter()
        .fold(CommandRouter::new(), |router, (name, handler)| {
            router.register(name, handler)
        });

    let router = QUIZ_LABELS.iter().fold(router, |router, label| {
        router.register_callback(label, quiz.clone().map(|q| q as Arc<dyn CallbackHandler>))
    });

    info!(commands = ?router.command_names(), "Command table built");
    router
}

/// Posts the daily inspiration to every registered group on each tick.
pub fn schedule_daily_inspiration(
    scheduler: &Scheduler,
    bot: Arc<dyn Bot>,
    groups: Arc<JsonStore<String>>,
    period: Duration,
) {
    scheduler.spawn_periodic("daily_inspiration", period, move || {
        let bot = bot.clone();
        let groups = groups.clone();
        async move {
            let recipients = groups.all().await;
            fan_out(
                bot.as_ref(),
                Audience::Groups,
                &recipients,
                replies::DAILY_INSPIRATION,
            )
            .await;
        }
    });
}

/// Builds all components for `bot`. Tests pass a mock bot; production passes the Telegram adapter.
#[instrument(skip(config, bot))]
pub async fn build_bot_components(config: &BotConfig, bot: Arc<dyn Bot>) -> Result<BotComponents> {
    let stores = open_stores(config).await?;

    let translator: Arc<dyn Translator> = Arc::new(GoogleTranslator::new(
        config.base().translate_api_url.as_deref(),
    ));
    let router = build_router(config, &stores, bot.clone(), translator).await;

    let dispatcher = UpdateDispatcher::new(router, bot.clone())
        .with_tracker(UserTracker::new(stores.users.clone()))
        .with_reconciler(MembershipReconciler::new(
            stores.groups.clone(),
            bot.clone(),
        ));

    let scheduler = Arc::new(Scheduler::new());
    if let Some(period) = config.features().daily_inspiration_interval() {
        schedule_daily_inspiration(&scheduler, bot.clone(), stores.groups.clone(), period);
    }

    Ok(BotComponents {
        stores,
        bot,
        dispatcher: Arc::new(dispatcher),
        scheduler,
    })
}
