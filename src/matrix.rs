use std::mem::{size_of};
use crate::quantify::Quantifiable;

///A simple matrix struct. Used for the weighted distances between routers when filling the routing tables.
#[derive(Debug,Clone)]
pub struct Matrix<T>
{
	data: Vec<T>,
	num_columns: usize,
}

impl<T> Matrix<T>
{
	///Read a matrix entry.
	pub fn get(&self,row:usize,column:usize) -> &T
	{
		&self.data[row*self.num_columns+column]
	}
	///Read/write a matrix entry.
	pub fn get_mut(&mut self,row:usize,column:usize) -> &mut T
	{
		&mut self.data[row*self.num_columns+column]
	}
	///Get the number of rows
	pub fn get_rows(&self) -> usize
	{
		if self.num_columns==0 { 0 } else { self.data.len()/self.num_columns }
	}
	///Get the number of columns
	pub fn get_columns(&self) -> usize
	{
		self.num_columns
	}
	///Build a matrix with constant values.
	pub fn constant(value:T,num_rows:usize,num_columns:usize) -> Matrix<T> where T:Clone
	{
		Matrix{
			data: vec![value;num_rows*num_columns],
			num_columns,
		}
	}
}

impl Matrix<Option<u64>>
{
	///Close a square matrix of arc lengths into a matrix of shortest path lengths, with the Floyd–Warshall algorithm.
	///`None` means that there is no path. The diagonal is set to 0.
	pub fn close_shortest_paths(&mut self)
	{
		let n=self.get_rows();
		assert_eq!(n,self.num_columns,"shortest paths require a square matrix");
		for i in 0..n
		{
			*self.get_mut(i,i)=Some(0);
		}
		for k in 0..n
		{
			for i in 0..n
			{
				let ik = match *self.get(i,k)
				{
					Some(x) => x,
					None => continue,
				};
				for j in 0..n
				{
					if let Some(kj) = *self.get(k,j)
					{
						let through = ik+kj;
						let entry = self.get_mut(i,j);
						match *entry
						{
							Some(current) if current<=through => (),
							_ => *entry=Some(through),
						}
					}
				}
			}
		}
	}
}

impl<T:Quantifiable> Quantifiable for Matrix<T>
{
	fn total_memory(&self) -> usize
	{
		size_of::<Matrix<T>>() + self.data.total_memory()
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

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn path_of_three()
	{
		//0 -1-> 1 -2-> 2, and a long direct arc 0 -5-> 2.
		let mut m = Matrix::constant(None,3,3);
		*m.get_mut(0,1)=Some(1);
		*m.get_mut(1,2)=Some(2);
		*m.get_mut(0,2)=Some(5);
		m.close_shortest_paths();
		assert_eq!(*m.get(0,2),Some(3));
		assert_eq!(*m.get(1,1),Some(0));
		assert_eq!(*m.get(2,0),None);
	}
}
