pub mod record;

#[cfg(target_arch = "xtensa")]
pub mod flash_content;
