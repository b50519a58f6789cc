mod contact_client;
mod docs;
mod health;
mod helpers;
mod static_site;
