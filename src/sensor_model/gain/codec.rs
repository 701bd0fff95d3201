use crate::sensor_model::gain::types::GainCode;

pub trait GainCodec {
    fn encode(&self, gain: f64) -> GainCode;
    fn decode(&self, code: GainCode) -> f64;
}
