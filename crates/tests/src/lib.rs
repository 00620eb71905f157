#[cfg(test)]
mod common;

#[cfg(test)]
mod stub_provider;

#[cfg(test)]
mod auth_gate_tests;

#[cfg(test)]
mod refresh_tests;

#[cfg(test)]
mod docs_tests;

#[cfg(test)]
mod health_tests;

#[cfg(test)]
mod session_tests;
