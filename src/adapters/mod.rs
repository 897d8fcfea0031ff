/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports,
/// providing the actual integration with the intelligence service, the
/// filesystem and the terminal.
pub mod outbound;
