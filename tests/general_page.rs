mod common;

use anyhow::Result;
use common::{ScriptedSession, options, page, page_with_updates};
use std::sync::Arc;
use tagger_options::config::options::registrations::general;
use tagger_options::config::options::{ConfigStore, Namespace, OptionValue};
use tagger_options::page::{Command, Msg, PageRuntime};
use tagger_options::session::{LoginOutcome, SessionProvider, SessionStatus};

#[tokio::test]
async fn test_save_then_load_round_trips_and_trims() -> Result<()> {
    let options = options();
    let session = Arc::new(ScriptedSession::new(&options));

    let mut editor = page(&options, session.clone());
    editor.load().await?;
    editor.on_host_changed(" host.example ");
    editor.set_port(8080);
    editor.set_flag(general::USE_SERVER_FOR_SUBMISSION, true)?;
    editor.set_flag(general::IGNORE_FILE_MBIDS, true)?;
    editor.on_cluster_toggled(true);
    editor.set_flag(general::CHECK_FOR_UPDATES, false)?;
    editor.set_update_check_days(3);
    editor.select_update_level(1)?;
    editor.set_flag(general::CHECK_FOR_PLUGIN_UPDATES, true)?;
    editor.save().await?;

    let mut reloaded = page(&options, session);
    reloaded.load().await?;
    let state = reloaded.state();

    assert_eq!(state.text(general::SERVER_HOST), "host.example");
    assert_eq!(state.int(general::SERVER_PORT), 8080);
    assert!(state.flag(general::USE_SERVER_FOR_SUBMISSION));
    assert!(!state.flag(general::ANALYZE_NEW_FILES));
    assert!(state.flag(general::CLUSTER_NEW_FILES));
    assert!(state.flag(general::IGNORE_FILE_MBIDS));
    assert!(!state.flag(general::CHECK_FOR_UPDATES));
    assert_eq!(state.int(general::UPDATE_CHECK_DAYS), 3);
    assert_eq!(state.selected_update_level(), 1);
    assert!(state.flag(general::CHECK_FOR_PLUGIN_UPDATES));

    assert_eq!(
        options.get_text(Namespace::Setting, general::SERVER_HOST).await?,
        "host.example"
    );
    Ok(())
}

#[tokio::test]
async fn test_stale_update_level_selects_default() -> Result<()> {
    let options = options();
    options
        .set_key(Namespace::Setting, general::UPDATE_LEVEL, OptionValue::Int(99))
        .await?;

    let mut page = page(&options, Arc::new(ScriptedSession::new(&options)));
    page.load().await?;

    assert_eq!(page.state().selected_update_level(), 0);
    assert_eq!(page.state().selected_update_level_label(), Some("Stable releases only"));

    // Saving writes the clamped selection back
    page.save().await?;
    assert_eq!(options.get_int(Namespace::Setting, general::UPDATE_LEVEL).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_unparseable_stored_value_falls_back_to_default() -> Result<()> {
    let options = options();
    options
        .store()
        .set_raw(Namespace::Setting, general::UPDATE_LEVEL, "nightly")
        .await?;
    options
        .store()
        .set_raw(Namespace::Setting, general::SERVER_PORT, "eighty")
        .await?;

    let mut page = page(&options, Arc::new(ScriptedSession::new(&options)));
    page.load().await?;

    assert_eq!(page.state().selected_update_level(), 0);
    assert_eq!(page.state().int(general::SERVER_PORT), 443);
    Ok(())
}

#[tokio::test]
async fn test_missing_update_level_shows_default_label() -> Result<()> {
    let options = options();
    let mut page = page(&options, Arc::new(ScriptedSession::new(&options)));
    page.load().await?;

    let state = page.state();
    assert_eq!(state.selected_update_level_label(), Some("Stable releases only"));
    let labels: Vec<&str> = state.update_level_choices.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(
        labels,
        ["Stable releases only", "Stable or Beta releases", "Stable, Beta or Dev releases"]
    );
    Ok(())
}

#[tokio::test]
async fn test_server_warning_follows_host() -> Result<()> {
    let options = options();
    let mut page = page(&options, Arc::new(ScriptedSession::new(&options)));
    page.load().await?;
    assert!(!page.state().server_warning_visible);

    page.update(Msg::HostChanged(String::new()));
    assert!(page.state().server_warning_visible);

    page.update(Msg::HostChanged("mirror.example.org".to_string()));
    assert!(page.state().server_warning_visible);

    page.update(Msg::HostChanged("beta.musicbrainz.org".to_string()));
    assert!(!page.state().server_warning_visible);
    Ok(())
}

#[tokio::test]
async fn test_stored_unofficial_host_warns_on_load() -> Result<()> {
    let options = options();
    options
        .set_key(
            Namespace::Setting,
            general::SERVER_HOST,
            OptionValue::Text("localhost".to_string()),
        )
        .await?;

    let mut page = page(&options, Arc::new(ScriptedSession::new(&options)));
    page.load().await?;
    assert!(page.state().server_warning_visible);
    Ok(())
}

#[tokio::test]
async fn test_auto_processing_switches_exclude_each_other() -> Result<()> {
    let options = options();
    let mut page = page(&options, Arc::new(ScriptedSession::new(&options)));
    page.load().await?;

    page.update(Msg::ClusterToggled(true));
    page.update(Msg::AnalyzeToggled(true));
    assert!(page.state().flag(general::ANALYZE_NEW_FILES));
    assert!(!page.state().flag(general::CLUSTER_NEW_FILES));

    page.update(Msg::ClusterToggled(true));
    assert!(!page.state().flag(general::ANALYZE_NEW_FILES));
    assert!(page.state().flag(general::CLUSTER_NEW_FILES));

    page.update(Msg::ClusterToggled(false));
    page.update(Msg::AnalyzeToggled(false));
    assert!(!page.state().flag(general::ANALYZE_NEW_FILES));
    assert!(!page.state().flag(general::CLUSTER_NEW_FILES));
    Ok(())
}

#[tokio::test]
async fn test_update_group_hidden_when_build_disables_updates() -> Result<()> {
    let options = options();
    let mut page = page_with_updates(&options, Arc::new(ScriptedSession::new(&options)), false);
    page.load().await?;
    assert!(!page.state().update_group_visible);
    Ok(())
}

#[tokio::test]
async fn test_load_reflects_existing_session() -> Result<()> {
    let options = options();
    let session = ScriptedSession::new(&options).already_logged_in("carol").await;
    let mut page = page(&options, Arc::new(session));
    page.load().await?;

    assert_eq!(
        page.status(),
        &SessionStatus::LoggedIn {
            username: "carol".to_string()
        }
    );
    assert_eq!(
        page.state().display.logged_in_text.as_deref(),
        Some("Logged in as <b>carol</b>.")
    );
    Ok(())
}

#[tokio::test]
async fn test_successful_login_shows_username() -> Result<()> {
    let options = options();
    let session = Arc::new(ScriptedSession::new(&options).succeed_as("alice"));
    let mut runtime = PageRuntime::new(page(&options, session.clone()));
    runtime.load().await?;

    runtime.dispatch(Msg::Login);
    assert_eq!(runtime.page().status(), &SessionStatus::LoggingIn);
    runtime.run_until_idle().await;

    let display = &runtime.page().state().display;
    assert_eq!(display.logged_in_text.as_deref(), Some("Logged in as <b>alice</b>."));
    assert!(!display.login_visible);
    assert!(display.logout_visible);
    assert_eq!(display.login_error_text, None);
    Ok(())
}

#[tokio::test]
async fn test_failed_login_shows_message_and_allows_retry() -> Result<()> {
    let options = options();
    let session = Arc::new(
        ScriptedSession::new(&options)
            .fail_with("access denied")
            .succeed_as("alice"),
    );
    let mut runtime = PageRuntime::new(page(&options, session.clone()));
    runtime.load().await?;

    runtime.dispatch(Msg::Login);
    runtime.run_until_idle().await;
    let display = &runtime.page().state().display;
    assert_eq!(display.login_error_text.as_deref(), Some("Login failed: access denied"));
    assert!(display.login_visible && display.login_enabled);

    runtime.dispatch(Msg::Login);
    runtime.run_until_idle().await;
    assert_eq!(
        runtime.page().status(),
        &SessionStatus::LoggedIn {
            username: "alice".to_string()
        }
    );
    assert_eq!(session.login_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_second_login_while_logging_in_is_ignored() -> Result<()> {
    let options = options();
    let session = Arc::new(
        ScriptedSession::gated(&options)
            .succeed_as("alice")
            .succeed_as("bob"),
    );
    let mut runtime = PageRuntime::new(page(&options, session.clone()));
    runtime.load().await?;

    runtime.dispatch(Msg::Login);
    runtime.dispatch(Msg::Login);
    assert_eq!(runtime.pending(), 1);

    session.release();
    runtime.run_until_idle().await;

    assert_eq!(session.login_calls(), 1);
    assert_eq!(
        runtime.page().status(),
        &SessionStatus::LoggedIn {
            username: "alice".to_string()
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_duplicate_login_result_is_dropped() -> Result<()> {
    let options = options();
    let session = Arc::new(ScriptedSession::new(&options).succeed_as("alice"));
    let mut page = page(&options, session);
    page.load().await?;

    let Command::Perform(future) = page.update(Msg::Login) else {
        panic!("login should start an async exchange");
    };
    let Msg::LoginFinished { ticket, outcome } = future.await else {
        panic!("login should finish with a login result");
    };
    assert_eq!(
        outcome,
        LoginOutcome::Success {
            username: "alice".to_string()
        }
    );

    page.update(Msg::LoginFinished { ticket, outcome });
    page.update(Msg::LoginFinished {
        ticket,
        outcome: LoginOutcome::Success {
            username: "mallory".to_string(),
        },
    });

    assert_eq!(
        page.status(),
        &SessionStatus::LoggedIn {
            username: "alice".to_string()
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_logout_abandons_in_flight_login() -> Result<()> {
    let options = options();
    let session = Arc::new(ScriptedSession::gated(&options).succeed_as("alice"));
    let mut runtime = PageRuntime::new(page(&options, session.clone()));
    runtime.load().await?;

    runtime.dispatch(Msg::Login);
    runtime.dispatch(Msg::Logout);
    assert_eq!(runtime.page().status(), &SessionStatus::LoggedOut);

    session.release();
    runtime.run_until_idle().await;

    assert_eq!(runtime.page().status(), &SessionStatus::LoggedOut);
    assert!(runtime.page().state().display.login_visible);
    assert!(!session.is_logged_in().await);
    assert_eq!(session.logout_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn test_restore_defaults_revokes_late_login() -> Result<()> {
    let options = options();
    let session = Arc::new(ScriptedSession::gated(&options).succeed_as("alice"));
    let mut runtime = PageRuntime::new(page(&options, session.clone()));
    runtime.load().await?;

    runtime.dispatch(Msg::Login);
    runtime.restore_defaults();
    assert!(runtime.next_completion().await);
    assert_eq!(session.logout_calls(), 1);

    session.release();
    runtime.run_until_idle().await;

    assert_eq!(runtime.page().status(), &SessionStatus::LoggedOut);
    assert!(!session.is_logged_in().await);
    assert_eq!(session.logout_calls(), 2);

    let mut reopened = page(&options, session.clone());
    reopened.load().await?;
    assert_eq!(reopened.status(), &SessionStatus::LoggedOut);
    Ok(())
}

#[tokio::test]
async fn test_restore_defaults_logs_out_and_keeps_persisted_state() -> Result<()> {
    let options = options();
    let session = Arc::new(ScriptedSession::new(&options).already_logged_in("alice").await);
    options
        .set_key(
            Namespace::Setting,
            general::SERVER_HOST,
            OptionValue::Text("localhost".to_string()),
        )
        .await?;
    options
        .set_key(Namespace::Setting, general::UPDATE_LEVEL, OptionValue::Int(2))
        .await?;

    let mut runtime = PageRuntime::new(page(&options, session.clone()));
    runtime.load().await?;
    runtime.page_mut().set_port(8000);
    runtime.page_mut().on_analyze_toggled(true);
    assert!(matches!(runtime.page().status(), SessionStatus::LoggedIn { .. }));

    runtime.restore_defaults();
    assert_eq!(runtime.page().status(), &SessionStatus::LoggedOut);

    let state = runtime.page().state();
    assert_eq!(state.text(general::SERVER_HOST), "musicbrainz.org");
    assert_eq!(state.int(general::SERVER_PORT), 443);
    assert!(!state.flag(general::ANALYZE_NEW_FILES));
    assert_eq!(state.selected_update_level(), 0);
    assert!(!state.server_warning_visible);

    runtime.run_until_idle().await;
    assert_eq!(session.logout_calls(), 1);
    assert_eq!(
        options.get_text(Namespace::Persist, general::OAUTH_USERNAME).await?,
        "alice"
    );

    // The store only changes on save
    assert_eq!(
        options.get_text(Namespace::Setting, general::SERVER_HOST).await?,
        "localhost"
    );
    runtime.save().await?;
    assert_eq!(
        options.get_text(Namespace::Setting, general::SERVER_HOST).await?,
        "musicbrainz.org"
    );
    assert_eq!(options.get_int(Namespace::Setting, general::UPDATE_LEVEL).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_result_after_teardown_is_discarded() -> Result<()> {
    let options = options();
    let session = Arc::new(ScriptedSession::gated(&options).succeed_as("alice"));
    let mut runtime = PageRuntime::new(page(&options, session.clone()));
    runtime.load().await?;

    runtime.dispatch(Msg::Login);
    runtime.destroy();

    session.release();
    session.login_returned().await;
    tokio::task::yield_now().await;

    assert!(!runtime.next_completion().await);
    assert_eq!(runtime.page().status(), &SessionStatus::LoggingIn);
    // The provider still completed the external session
    assert!(session.is_logged_in().await);
    Ok(())
}
