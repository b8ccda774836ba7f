/// The master output stage the operators are summed into.
pub trait Mixer {
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
}
