pub mod dispatcher;
pub mod extract;
pub mod mcp;
pub mod resolvers;

pub use dispatcher::{classify, Dispatcher, Operation, RequestContext, UNSUPPORTED_OPERATION};
pub use extract::resolve_message;
pub use mcp::StaticMcpSource;
