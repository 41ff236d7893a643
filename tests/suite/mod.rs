mod commands;
mod config_session;
mod cross_role;
mod navigation;
mod seed_files;
