use std::fmt;

// Identity of a registered handler: its fully qualified gRPC service name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceDescriptor {
    pub name: &'static str,
}

impl ServiceDescriptor {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Route prefix the dispatch server matches for this service.
    pub fn route_prefix(&self) -> String {
        format!("/{}/", self.name)
    }
}

impl fmt::Display for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
