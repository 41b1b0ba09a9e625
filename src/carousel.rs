use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::model::Testimonial;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Other,
}

impl NavKey {
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => NavKey::ArrowLeft,
            "ArrowRight" => NavKey::ArrowRight,
            _ => NavKey::Other,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CarouselView {
    pub index: usize,
    pub len: usize,
    pub testimonial: Testimonial,
}

/// Cursor over a fixed, non-empty list of testimonials.
pub struct Carousel {
    items: Vec<Testimonial>,
    index: usize,
}

impl Carousel {
    pub fn new(items: Vec<Testimonial>) -> Result<Self> {
        if items.is_empty() {
            return Err(DashboardError::EmptyCarousel);
        }
        Ok(Carousel { items, index: 0 })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn current(&self) -> &Testimonial {
        &self.items[self.index]
    }

    pub fn next(&mut self) -> &Testimonial {
        self.index = (self.index + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> &Testimonial {
        let len = self.items.len();
        self.index = (self.index + len - 1) % len;
        self.current()
    }

    pub fn handle_key(&mut self, key: NavKey) {
        match key {
            NavKey::ArrowLeft => {
                self.prev();
            }
            NavKey::ArrowRight => {
                self.next();
            }
            NavKey::Other => {}
        }
    }

    pub fn view(&self) -> CarouselView {
        CarouselView {
            index: self.index,
            len: self.items.len(),
            testimonial: self.current().clone(),
        }
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Carousel {
            items: default_testimonials(),
            index: 0,
        }
    }
}

pub fn default_testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial::new("“This platform made tracking my progress so easy and fun!”", "— Priya, Student"),
        Testimonial::new("“The growth chart is so motivating. Love the design!”", "— Rahul, Student"),
        Testimonial::new("“Simple, secure, and beautiful. Highly recommended!”", "— Mrs. Sharma, Teacher"),
        Testimonial::new("“I can finally see my academic journey at a glance.”", "— Aarav, Student"),
        Testimonial::new("“Education is the most powerful weapon which you can use to change the world.”", "— Nelson Mandela"),
        Testimonial::new("“Success is not the key to happiness. Happiness is the key to success.”", "— Albert Schweitzer"),
        Testimonial::new("“The future belongs to those who believe in the beauty of their dreams.”", "— Eleanor Roosevelt"),
        Testimonial::new("“The expert in anything was once a beginner.”", "— Helen Hayes"),
        Testimonial::new("“Don't let what you cannot do interfere with what you can do.”", "— John Wooden"),
        Testimonial::new("“Strive for progress, not perfection.”", "— Unknown"),
        Testimonial::new("“Learning never exhausts the mind.”", "— Leonardo da Vinci"),
        Testimonial::new("“The beautiful thing about learning is that no one can take it away from you.”", "— B.B. King"),
        Testimonial::new("“Success is the sum of small efforts, repeated day in and day out.”", "— Robert Collier"),
        Testimonial::new("“The only way to do great work is to love what you do.”", "— Steve Jobs"),
        Testimonial::new("“Opportunities don't happen, you create them.”", "— Chris Grosser"),
        Testimonial::new("“Push yourself, because no one else is going to do it for you.”", "— Unknown"),
        Testimonial::new("“Great things never come from comfort zones.”", "— Unknown"),
        Testimonial::new("“Dream bigger. Do bigger.”", "— Unknown"),
        Testimonial::new("“Don't watch the clock; do what it does. Keep going.”", "— Sam Levenson"),
        Testimonial::new("“The secret of getting ahead is getting started.”", "— Mark Twain"),
        Testimonial::new("“You don't have to be great to start, but you have to start to be great.”", "— Zig Ziglar"),
        Testimonial::new("“Believe you can and you're halfway there.”", "— Theodore Roosevelt"),
        Testimonial::new("“It always seems impossible until it's done.”", "— Nelson Mandela"),
        Testimonial::new("“Mistakes are proof that you are trying.”", "— Jennifer Lim"),
        Testimonial::new("“The harder you work for something, the greater you'll feel when you achieve it.”", "— Unknown"),
    ]
}
