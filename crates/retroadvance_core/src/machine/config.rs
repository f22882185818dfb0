use typed_builder::TypedBuilder;

/// Machine construction options.
///
/// ```
/// use retroadvance_core::MachineConfig;
///
/// let config = MachineConfig::builder().dma_log_mask(0b1000).build();
/// assert!(config.post_boot);
/// ```
#[derive(TypedBuilder, Clone, Debug, Eq, PartialEq)]
pub struct MachineConfig {
    /// Start from the state the BIOS leaves behind (POSTFLG = 1) instead of
    /// a cold boot.
    #[builder(default = true)]
    pub post_boot: bool,
    /// Bit N enables a debug log line for every transfer on DMA channel N.
    #[builder(default = 0)]
    pub dma_log_mask: u8,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
