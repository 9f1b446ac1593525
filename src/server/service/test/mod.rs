mod auth;
mod catalog;
mod comment;
mod dashboard;
mod enrollment;
mod payment;
mod progress;
