//! Generated protobuf/gRPC bindings for the `aes` wire contract.

tonic::include_proto!("aes");
