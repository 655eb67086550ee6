mod auth;
mod batch;
mod forecast;
mod helpers;
