pub mod protobuf;
pub mod thrift;

use dsngen_model::IdlType;

use crate::traits::IdlBackend;

/// Create the include provider for the given backend.
pub fn create_backend(idl_type: IdlType) -> Box<dyn IdlBackend> {
    match idl_type {
        IdlType::Thrift => Box::new(thrift::ThriftBackend),
        IdlType::Protobuf => Box::new(protobuf::ProtobufBackend),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_matches_requested_backend() {
        for idl_type in [IdlType::Thrift, IdlType::Protobuf] {
            assert_eq!(create_backend(idl_type).idl_type(), idl_type);
        }
    }
}
