/*!

The set of network interfaces a packet is addressed to, or that a link can reach.

A `DestinationSet` is a bit vector indexed by network interface. The routing unit never modifies the sets it receives; it only asks whether two sets intersect and whether an interface belongs to a set.

*/

use std::fmt::{Debug,Formatter};
use quantifiable_derive::Quantifiable;//the derive macro

const BITS:usize = 64;

#[derive(Clone,PartialEq,Eq,Default,Quantifiable)]
pub struct DestinationSet
{
	words: Vec<u64>,
}

impl DestinationSet
{
	pub fn new() -> DestinationSet
	{
		DestinationSet{ words: vec![] }
	}
	///The set with just `interface`.
	pub fn single(interface:usize) -> DestinationSet
	{
		let mut set = DestinationSet::new();
		set.add(interface);
		set
	}
	pub fn add(&mut self, interface:usize)
	{
		let word = interface/BITS;
		if word>=self.words.len()
		{
			self.words.resize(word+1,0);
		}
		self.words[word] |= 1u64 << (interface%BITS);
	}
	pub fn is_element(&self, interface:usize) -> bool
	{
		match self.words.get(interface/BITS)
		{
			Some(word) => word & (1u64 << (interface%BITS)) != 0,
			None => false,
		}
	}
	pub fn intersection_is_not_empty(&self, other:&DestinationSet) -> bool
	{
		self.words.iter().zip(other.words.iter()).any(|(a,b)| a&b != 0)
	}
	pub fn is_empty(&self) -> bool
	{
		self.words.iter().all(|&w|w==0)
	}
	///Iterate the interfaces in the set, in increasing order.
	pub fn iter(&self) -> impl Iterator<Item=usize> + '_
	{
		self.words.iter().enumerate().flat_map(|(index,&word)|
			(0..BITS).filter(move |bit| word & (1u64<<bit) != 0).map(move |bit| index*BITS+bit)
		)
	}
}

impl std::iter::FromIterator<usize> for DestinationSet
{
	fn from_iter<I:IntoIterator<Item=usize>>(iter:I) -> DestinationSet
	{
		let mut set = DestinationSet::new();
		for interface in iter
		{
			set.add(interface);
		}
		set
	}
}

impl Debug for DestinationSet
{
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
	{
		f.debug_set().entries(self.iter()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn membership_and_intersection()
	{
		let a:DestinationSet = vec![1,70,130].into_iter().collect();
		let b:DestinationSet = vec![2,70].into_iter().collect();
		let c = DestinationSet::single(3);
		assert!(a.is_element(130));
		assert!(!a.is_element(2));
		assert!(!a.is_element(100000));
		assert!(a.intersection_is_not_empty(&b));
		assert!(b.intersection_is_not_empty(&a));
		assert!(!a.intersection_is_not_empty(&c));
		assert!(!a.intersection_is_not_empty(&DestinationSet::new()));
		assert!(DestinationSet::new().is_empty());
		assert_eq!(a.iter().collect::<Vec<_>>(),vec![1,70,130]);
	}
}
