use std::ops::*;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

impl<T> Sub for Vec2<T>
where
    T: Sub<Output = T> + Copy,
{
    type Output = Vec2<T>;
    fn sub(self, other: Vec2<T>) -> Vec2<T> {
        Vec2::<T> {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<T> AddAssign for Vec2<T>
where
    T: AddAssign + Copy,
{
    fn add_assign(&mut self, other: Vec2<T>) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Vec2<f32> {
    pub const fn new(x: f32, y: f32) -> Vec2<f32> {
        Vec2::<f32> { x, y }
    }

    pub fn mag(self) -> f32 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    pub fn dist(self, other: Vec2<f32>) -> f32 {
        (self - other).mag()
    }

    pub fn to_p2(self) -> crate::graphics::P2 {
        crate::graphics::P2(self.x.round() as i32, self.y.round() as i32)
    }
}
