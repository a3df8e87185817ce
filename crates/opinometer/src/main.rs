use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use env_flags::env_flags;
use once_cell::sync::OnceCell;

use opinometer::analysis::{analyze_post, cooccurrence_network, sort_results, summarize, word_frequencies};
use opinometer::config::{UserConfig, expand_home, load_user_config, parse_input, parse_inputs, resolve_home};
use opinometer::sink::{JsonFileSink, LogSink, ResultSink, RunReport};
use opinometer::source::{PostSource, SavedResponseSource, collect_all};
use opinometer::vocab::{BUILTIN, Vocabulary, load_from_file};
use opinometer::{LexiconScorer, MentionExtractor};

const NETWORK_MIN_WORD_FREQ: usize = 3;
const NETWORK_MIN_COOCCURRENCE: usize = 2;

fn env_set(k: &str) -> bool {
    std::env::var_os(k).is_some()
}

fn init_tracing(home: &std::path::Path, user_cfg: Option<&UserConfig>) {
    env_flags! {
        /// Tracing filter, e.g. "info", "debug", or targets format.
        RUST_LOG: &str = "info";
        /// Preferred filter env (alias). If set, overrides RUST_LOG.
        TRACING_FILTER: &str = "";
        /// Pretty formatting for logs (ignored if TRACING_JSON=true).
        TRACING_PRETTY: bool = false;
        /// Compact single-line formatting for logs (ignored if TRACING_JSON=true)
        TRACING_COMPACT: bool = true;
        /// JSON formatting for logs
        TRACING_JSON: bool = false;
        /// If true, also log to file under <OPINOMETER_HOME>/logs or LOG_DIR
        LOG_TO_FILE: bool = false;
        /// Optional explicit log directory (absolute). Defaults to <OPINOMETER_HOME>/logs
        LOG_DIR: &str = "";
    }

    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, prelude::*};

    let mut rust_log = if !(*TRACING_FILTER).is_empty() {
        (*TRACING_FILTER).to_string()
    } else {
        (*RUST_LOG).to_string()
    };
    let mut tracing_json = *TRACING_JSON;
    let mut tracing_compact = *TRACING_COMPACT;
    let mut tracing_pretty = *TRACING_PRETTY;
    let mut log_to_file = *LOG_TO_FILE;
    let mut log_dir: Option<PathBuf> = if !(*LOG_DIR).is_empty() {
        Some(PathBuf::from((*LOG_DIR).to_string()))
    } else {
        None
    };

    if let Some(cfg) = user_cfg.and_then(|c| c.logging.as_ref()) {
        if !(env_set("TRACING_FILTER") || env_set("RUST_LOG"))
            && let Some(level) = cfg.level.as_ref()
        {
            rust_log = level.clone();
        }
        if !env_set("TRACING_JSON")
            && let Some(v) = cfg.json
        {
            tracing_json = v;
        }
        if !env_set("TRACING_COMPACT")
            && let Some(v) = cfg.compact
        {
            tracing_compact = v;
        }
        if !env_set("TRACING_PRETTY")
            && let Some(v) = cfg.pretty
        {
            tracing_pretty = v;
        }
        if !env_set("LOG_TO_FILE")
            && let Some(v) = cfg.to_file
        {
            log_to_file = v;
        }
        if !env_set("LOG_DIR")
            && let Some(dir) = cfg.dir.as_ref()
        {
            log_dir = Some(expand_home(dir));
        }
    }

    let filter = EnvFilter::try_new(rust_log).unwrap_or_else(|_| EnvFilter::new("info"));

    let base = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_target(true)
        .with_ansi(true)
        // Reports go to files; logs stay on stderr.
        .with_writer(std::io::stderr);

    static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();
    let mut dir_error = None;
    let file_writer = if log_to_file {
        let dir = log_dir.unwrap_or_else(|| home.join("logs"));
        match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, "opinometer.log");
                let (nb, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                Some(nb)
            }
            Err(e) => {
                dir_error = Some((dir, e));
                None
            }
        }
    } else {
        None
    };

    let reg = tracing_subscriber::registry().with(filter);
    // File layers are typed by the stack they join, so each branch builds its own.
    let res = if tracing_json {
        let file_layer = file_writer.map(|nb| {
            tracing_subscriber::fmt::layer()
                .with_file(false)
                .with_line_number(false)
                .with_target(true)
                .with_ansi(false)
                .with_writer(nb)
                .json()
        });
        reg.with(base.json()).with(file_layer).try_init()
    } else if tracing_compact {
        let file_layer = file_writer.map(|nb| {
            tracing_subscriber::fmt::layer()
                .with_file(false)
                .with_line_number(false)
                .with_target(true)
                .with_ansi(false)
                .with_writer(nb)
                .compact()
        });
        reg.with(base.compact()).with(file_layer).try_init()
    } else if tracing_pretty {
        let file_layer = file_writer.map(|nb| {
            tracing_subscriber::fmt::layer()
                .with_file(false)
                .with_line_number(false)
                .with_target(true)
                .with_ansi(false)
                .with_writer(nb)
                .pretty()
        });
        reg.with(base.pretty()).with(file_layer).try_init()
    } else {
        let file_layer = file_writer.map(|nb| {
            tracing_subscriber::fmt::layer()
                .with_file(false)
                .with_line_number(false)
                .with_target(true)
                .with_ansi(false)
                .with_writer(nb)
        });
        reg.with(base).with(file_layer).try_init()
    };
    if let Err(e) = res {
        tracing::debug!("tracing already set: {:?}", e);
    }
    if let Some((dir, e)) = dir_error {
        tracing::warn!("failed to create log dir {}: {}", dir.display(), e);
    }
}

/// Env wins, then the `[run]` table, then the flag default.
fn pick<T>(key: &str, env_value: T, file_value: Option<T>) -> T {
    if env_set(key) {
        env_value
    } else {
        file_value.unwrap_or(env_value)
    }
}

async fn run(home: PathBuf, user_cfg: Option<UserConfig>) -> anyhow::Result<()> {
    env_flags! {
        /// Search query; comma-separated terms are OR'ed.
        QUERY: &str = "Claude Code";
        /// Total posts to collect across all inputs.
        LIMIT: usize = 60;
        /// Saved responses to read, as comma-separated platform=path.
        INPUTS: &str = "";
        /// Directory for JSON exports.
        RESULTS_DIR: &str = "results";
        /// Sort by date (newest first) instead of sentiment.
        SORT_BY_DATE: bool = false;
        /// Log every post instead of the top and bottom five.
        SHOW_ALL: bool = false;
        /// Build and log the word co-occurrence network.
        SHOW_NETWORK: bool = false;
        /// Number of most frequent words to report.
        TOP_WORDS: usize = 30;
        /// Optional vocabulary TOML extending the built-in tables.
        VOCABULARY_FILE: &str = "";
        /// Token window for tier-anchored mention detection.
        PROXIMITY_WINDOW: usize = 12;
    }

    let run_cfg = user_cfg.and_then(|c| c.run).unwrap_or_default();
    let query = pick("QUERY", (*QUERY).to_string(), run_cfg.query);
    let limit = pick("LIMIT", *LIMIT, run_cfg.limit);
    let results_dir = pick("RESULTS_DIR", (*RESULTS_DIR).to_string(), run_cfg.results_dir);
    let sort_by_date = pick("SORT_BY_DATE", *SORT_BY_DATE, run_cfg.sort_by_date);
    let show_all = pick("SHOW_ALL", *SHOW_ALL, run_cfg.show_all);
    let show_network = pick("SHOW_NETWORK", *SHOW_NETWORK, run_cfg.show_network);
    let top_words = pick("TOP_WORDS", *TOP_WORDS, run_cfg.top_words);
    let window = pick("PROXIMITY_WINDOW", *PROXIMITY_WINDOW, run_cfg.proximity_window);
    let vocabulary_file = pick("VOCABULARY_FILE", (*VOCABULARY_FILE).to_string(), run_cfg.vocabulary_file);

    let inputs = if !(*INPUTS).is_empty() || env_set("INPUTS") {
        parse_inputs(*INPUTS).context("parsing INPUTS")?
    } else {
        run_cfg
            .inputs
            .unwrap_or_default()
            .iter()
            .map(|e| parse_input(e))
            .collect::<anyhow::Result<Vec<_>>>()
            .context("parsing [run].inputs")?
    };
    anyhow::ensure!(
        !inputs.is_empty(),
        "no inputs configured; set INPUTS=reddit=<file>,hackernews=<file> or [run].inputs in {}",
        home.join("config.toml").display()
    );

    let custom_vocab: Vocabulary;
    let vocab: &Vocabulary = if vocabulary_file.is_empty() {
        &BUILTIN
    } else {
        custom_vocab = load_from_file(&expand_home(&vocabulary_file))?;
        &custom_vocab
    };
    let extractor = MentionExtractor::new(vocab).with_window(window);

    tracing::info!("collecting up to {} posts for '{}' from {} inputs", limit, query, inputs.len());
    let sources: Vec<Arc<dyn PostSource>> = inputs
        .into_iter()
        .map(|(platform, path)| Arc::new(SavedResponseSource::new(platform, path)) as Arc<dyn PostSource>)
        .collect();
    let posts = collect_all(sources, &query, limit).await;
    if posts.is_empty() {
        tracing::warn!("no posts found for '{}'", query);
    }

    let scorer = LexiconScorer::new();
    let mut results: Vec<_> = posts.iter().map(|p| analyze_post(p, &scorer, &extractor)).collect();
    sort_results(&mut results, sort_by_date);
    let summary = summarize(&results);
    let words = word_frequencies(&results, &query, top_words);
    let network = show_network
        .then(|| cooccurrence_network(&results, &query, NETWORK_MIN_WORD_FREQ, NETWORK_MIN_COOCCURRENCE));

    let mut report = RunReport::new(query, posts, results, summary).with_words(words);
    if let Some(network) = network {
        report = report.with_network(network);
    }
    tracing::debug!("run {}", report.run_id);

    let mut sinks: Vec<Box<dyn ResultSink>> = vec![
        Box::new(LogSink { show_all, show_network }),
        Box::new(JsonFileSink::new(expand_home(&results_dir))),
    ];
    for sink in sinks.iter_mut() {
        sink.accept(&report)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_flags! {
        /// Opinometer home directory (absolute). Defaults to $HOME/.opinometer
        OPINOMETER_HOME: &str = "";
    }

    let home = resolve_home(*OPINOMETER_HOME);
    let (user_cfg, cfg_error) = match load_user_config(&home) {
        Ok(cfg) => (cfg, None),
        Err(e) => (None, Some(e)),
    };
    init_tracing(&home, user_cfg.as_ref());
    if let Some(e) = cfg_error {
        tracing::warn!("ignoring config: {:#}", e);
    }
    tracing::info!("opinometer_home={}", home.display());

    match run(home, user_cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
