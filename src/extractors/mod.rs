pub(crate) mod auth_user;
