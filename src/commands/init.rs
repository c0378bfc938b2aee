use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let config = Config::init()?;
    config.save()?;
    msg_success!(Message::ConfigSaved);
    Ok(())
}
