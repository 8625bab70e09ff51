//! Options of the General page: server, login session, file handling, updates

use crate::config::options::{OptionDefBuilder, OptionsRegistry};
use crate::constants::{DEFAULT_UPDATE_LEVEL, OFFICIAL_SERVERS};
use anyhow::Result;

pub const SERVER_HOST: &str = "server_host";
pub const SERVER_PORT: &str = "server_port";
pub const USE_SERVER_FOR_SUBMISSION: &str = "use_server_for_submission";
pub const ANALYZE_NEW_FILES: &str = "analyze_new_files";
pub const CLUSTER_NEW_FILES: &str = "cluster_new_files";
pub const IGNORE_FILE_MBIDS: &str = "ignore_file_mbids";
pub const OAUTH_REFRESH_TOKEN: &str = "oauth_refresh_token";
pub const OAUTH_REFRESH_TOKEN_SCOPES: &str = "oauth_refresh_token_scopes";
pub const OAUTH_ACCESS_TOKEN: &str = "oauth_access_token";
pub const OAUTH_ACCESS_TOKEN_EXPIRES: &str = "oauth_access_token_expires";
pub const OAUTH_USERNAME: &str = "oauth_username";
pub const CHECK_FOR_UPDATES: &str = "check_for_updates";
pub const UPDATE_CHECK_DAYS: &str = "update_check_days";
pub const UPDATE_LEVEL: &str = "update_level";
pub const LAST_UPDATE_CHECK: &str = "last_update_check";
pub const CHECK_FOR_PLUGIN_UPDATES: &str = "check_for_plugin_updates";

/// Register all General page options, in page order
pub fn register(registry: &mut OptionsRegistry) -> Result<()> {
    let options = [
        OptionDefBuilder::setting(SERVER_HOST)
            .title("Server address")
            .text_type(OFFICIAL_SERVERS[0]),
        OptionDefBuilder::setting(SERVER_PORT).title("Port").int_type(443),
        OptionDefBuilder::setting(USE_SERVER_FOR_SUBMISSION).bool_type(false),
        OptionDefBuilder::setting(ANALYZE_NEW_FILES)
            .title("Automatically scan all new files")
            .bool_type(false),
        OptionDefBuilder::setting(CLUSTER_NEW_FILES)
            .title("Automatically cluster all new files")
            .bool_type(false),
        OptionDefBuilder::setting(IGNORE_FILE_MBIDS)
            .title("Ignore MBIDs when loading new files")
            .bool_type(false),
        OptionDefBuilder::persist(OAUTH_REFRESH_TOKEN).text_type(""),
        OptionDefBuilder::persist(OAUTH_REFRESH_TOKEN_SCOPES).text_type(""),
        OptionDefBuilder::persist(OAUTH_ACCESS_TOKEN).text_type(""),
        OptionDefBuilder::persist(OAUTH_ACCESS_TOKEN_EXPIRES).int_type(0),
        OptionDefBuilder::persist(OAUTH_USERNAME).text_type(""),
        OptionDefBuilder::setting(CHECK_FOR_UPDATES)
            .title("Check for program updates during startup")
            .bool_type(true),
        OptionDefBuilder::setting(UPDATE_CHECK_DAYS)
            .title("Days between update checks")
            .int_type(7),
        OptionDefBuilder::setting(UPDATE_LEVEL)
            .title("Updates to check")
            .int_type(DEFAULT_UPDATE_LEVEL),
        OptionDefBuilder::persist(LAST_UPDATE_CHECK).int_type(0),
        OptionDefBuilder::setting(CHECK_FOR_PLUGIN_UPDATES)
            .title("Check for plugin updates during startup")
            .bool_type(false),
    ];

    let count = options.len();
    for builder in options {
        registry.register(builder.build()?)?;
    }

    log::info!("Registered {} general options", count);
    Ok(())
}
