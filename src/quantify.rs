use std::mem::{size_of};

// See https://users.rust-lang.org/t/deriving-the-implementation-of-trait-for-structs/25730/9
// This is similar to https://docs.rs/heapsize/0.4.2/heapsize/ as noted by notriddle
// heapsize derive macro is at https://docs.rs/heapsize_derive/0.1.4/src/heapsize_derive/lib.rs.html#5-108 , as pointed by droundy

/// Memory accounting of the routing structures. `#[derive(Quantifiable)]` implements it for structs and enums whose fields implement it.
pub trait Quantifiable
{
	/// Get the total memory currently being employed by the implementing type. Both stack and heap.
	fn total_memory(&self) -> usize;
	/// Prints by stdout how much memory is used per component.
	fn print_memory_breakdown(&self);
	/// Get an estimation on how much memory the type could reach during the simulation.
	fn forecast_total_memory(&self) -> usize;
}

impl<T:Quantifiable> Quantifiable for Vec<T>
{
	fn total_memory(&self) -> usize
	{
		return size_of::<Vec<T>>() + self.iter().map(|e|e.total_memory()).sum::<usize>() + (self.capacity()-self.len())*size_of::<T>();
	}
	fn print_memory_breakdown(&self)
	{
		unimplemented!();
	}
	fn forecast_total_memory(&self) -> usize
	{
		//Routing structures do not grow after setup.
		self.total_memory()
	}
}

impl<T:Quantifiable+?Sized> Quantifiable for Box<T>
{
	fn total_memory(&self) -> usize
	{
		return size_of::<Box<T>>() + self.as_ref().total_memory();
	}
	fn print_memory_breakdown(&self)
	{
		unimplemented!();
	}
	fn forecast_total_memory(&self) -> usize
	{
		self.total_memory()
	}
}

impl<T:Quantifiable> Quantifiable for Option<T>
{
	fn total_memory(&self) -> usize
	{
		match self
		{
			&None => size_of::<Option<T>>(),
			&Some(ref thing) => size_of::<Option<T>>() - size_of::<T>() + thing.total_memory(),
		}
	}
	fn print_memory_breakdown(&self)
	{
		unimplemented!();
	}
	fn forecast_total_memory(&self) -> usize
	{
		self.total_memory()
	}
}

macro_rules! quantifiable_simple
{
	($t:ty) =>
	{
		impl Quantifiable for $t
		{
			fn total_memory(&self) -> usize
			{
				return size_of::<$t>();
			}
			fn print_memory_breakdown(&self)
			{
				unimplemented!();
			}
			fn forecast_total_memory(&self) -> usize
			{
				return size_of::<$t>();
			}
		}
	}
}

quantifiable_simple!(bool);
quantifiable_simple!(i32);
quantifiable_simple!(u64);
quantifiable_simple!(usize);
quantifiable_simple!(f64);

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn vectors_count_their_elements()
	{
		let v:Vec<u64> = Vec::with_capacity(4);
		let empty = v.total_memory();
		let mut w:Vec<u64> = Vec::with_capacity(4);
		w.push(7);
		assert_eq!(empty,w.total_memory());
		let some:Option<usize> = Some(3);
		assert_eq!(some.total_memory(),size_of::<Option<usize>>());
	}
}
