pub mod common;

mod test_damage;
mod test_protect;
mod test_status;
