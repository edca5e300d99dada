mod http;
mod namespaces;
mod session;
