pub trait Addressable<T> {
    fn read(&self, address: usize) -> T;
    fn write(&mut self, address: usize, value: T);
}

/// One flag per instruction address, set once the address has been executed.
#[derive(Debug, Default, Clone)]
pub struct Memory {
    data: Vec<bool>,
}

impl Memory {
    /// Clears every flag and resizes the map to cover `size` addresses.
    pub fn reset(&mut self, size: usize) {
        self.data.clear();
        self.data.resize(size, false);
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Number of addresses marked so far.
    pub fn marked(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

impl Addressable<bool> for Memory {
    fn read(&self, address: usize) -> bool {
        self.data[address]
    }

    fn write(&mut self, address: usize, value: bool) {
        self.data[address] = value;
    }
}
